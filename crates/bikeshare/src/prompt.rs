//! Filter collection as a small input-validation state machine.
//!
//! The machine moves city → month → day and exits once all three are valid.
//! Invalid input leaves the state unchanged and asks again. It never touches
//! stdin itself, so tests can script it with [`FilterPrompt::feed`].

use bikeshare_core::models::{City, FilterCriteria, Month, Selection, Weekday};

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    City,
    Month { city: City },
    Day { city: City, month: Selection<Month> },
    Done(FilterCriteria),
}

/// What the caller should do after feeding one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Input accepted; show this next question.
    Ask(&'static str),
    /// Input rejected; show this re-prompt.
    Retry(&'static str),
    /// All three criteria collected.
    Done(FilterCriteria),
}

#[derive(Debug, Clone)]
pub struct FilterPrompt {
    state: PromptState,
}

impl Default for FilterPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterPrompt {
    pub fn new() -> Self {
        Self {
            state: PromptState::City,
        }
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    /// The question for the current state.
    pub fn question(&self) -> &'static str {
        match self.state {
            PromptState::City => "Enter the city (Chicago, New York City, Washington): ",
            PromptState::Month { .. } => {
                "Enter month (All, January, February, March, April, May, June): "
            }
            PromptState::Day { .. } => {
                "Enter day (All, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday): "
            }
            PromptState::Done(_) => "",
        }
    }

    fn retry_message(&self) -> &'static str {
        match self.state {
            PromptState::City => "Choose between Chicago, New York City, or Washington: ",
            PromptState::Month { .. } => "Enter a valid month (All, January, February, ..., June): ",
            PromptState::Day { .. } => "Enter a valid day (All, Monday, Tuesday, ..., Sunday): ",
            PromptState::Done(_) => "",
        }
    }

    /// Consume one line of user input.
    pub fn feed(&mut self, input: &str) -> Step {
        let next = match self.state {
            PromptState::City => input
                .parse::<City>()
                .ok()
                .map(|city| PromptState::Month { city }),
            PromptState::Month { city } => input
                .parse::<Selection<Month>>()
                .ok()
                .map(|month| PromptState::Day { city, month }),
            PromptState::Day { city, month } => input
                .parse::<Selection<Weekday>>()
                .ok()
                .map(|day| PromptState::Done(FilterCriteria { city, month, day })),
            PromptState::Done(criteria) => return Step::Done(criteria),
        };

        match next {
            Some(PromptState::Done(criteria)) => {
                self.state = PromptState::Done(criteria);
                Step::Done(criteria)
            }
            Some(state) => {
                self.state = state;
                Step::Ask(self.question())
            }
            None => Step::Retry(self.retry_message()),
        }
    }
}

/// `true` unless the user typed `no` (case-insensitive) at the raw-data prompt.
pub fn wants_more_rows(input: &str) -> bool {
    !input.trim().eq_ignore_ascii_case("no")
}

/// `true` only when the user typed `yes` at the restart prompt.
pub fn wants_restart(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("yes")
}

// ── Tests ──────────────────────────────────────────────────────────────────────
