mod bootstrap;
mod prompt;
mod report;
mod session;

use anyhow::Result;
use bikeshare_core::settings::Settings;
use session::OutputOptions;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Data directory: {}", settings.data_dir.display());

    let sources = settings.city_sources();
    let options = OutputOptions {
        json: settings.json_output(),
        page_size: usize::from(settings.page_size),
    };
    let mut stdout = std::io::stdout().lock();

    match settings.criteria() {
        Some(criteria) => {
            tracing::info!("Running a single non-interactive session");
            session::run_once(&sources, &criteria, options, &mut stdout)?;
        }
        None => {
            let mut stdin = std::io::stdin().lock();
            session::run_interactive(&sources, options, &mut stdin, &mut stdout)?;
        }
    }

    Ok(())
}
