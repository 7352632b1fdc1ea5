use log::debug;

use crate::{MuscleGroup, ReportError, StrengthReport, StrengthTest, TestResult, TestingResults};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Intro,
    Testing(MuscleGroup),
    Results(StrengthReport),
    Skipped,
}

impl FlowState {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, FlowState::Results(_) | FlowState::Skipped)
    }
}

/// Sequences the home strength test from the intro over one test per muscle group to the
/// results.
///
/// Partial results only live inside the flow. Resetting or dropping the flow discards them.
#[derive(Debug, Clone)]
pub struct HomeTestFlow {
    state: FlowState,
    results: TestingResults,
}

impl HomeTestFlow {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FlowState::Intro,
            results: TestingResults::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    #[must_use]
    pub fn results(&self) -> &TestingResults {
        &self.results
    }

    #[must_use]
    pub fn current_group(&self) -> Option<MuscleGroup> {
        match self.state {
            FlowState::Testing(group) => Some(group),
            _ => None,
        }
    }

    pub fn begin(&mut self) -> Result<&FlowState, FlowError> {
        match self.state {
            FlowState::Intro => {
                self.transition(FlowState::Testing(MuscleGroup::first()));
                Ok(&self.state)
            }
            FlowState::Testing(_) => Err(FlowError::AlreadyStarted),
            FlowState::Results(_) | FlowState::Skipped => Err(FlowError::Finished),
        }
    }

    /// Bypasses the remaining test. Results recorded so far are discarded.
    pub fn skip(&mut self) -> Result<(), FlowError> {
        if self.state.is_finished() {
            return Err(FlowError::Finished);
        }
        self.results.clear();
        self.transition(FlowState::Skipped);
        Ok(())
    }

    /// Records the result of the current muscle group.
    ///
    /// Advancing from the intro begins the test implicitly. The result of the last muscle
    /// group completes the test, unless the results cannot be evaluated, in which case the
    /// flow stays at the last muscle group.
    pub fn advance(
        &mut self,
        strength_test: &StrengthTest,
        result: TestResult,
    ) -> Result<&FlowState, FlowError> {
        let group = match self.state {
            FlowState::Intro => MuscleGroup::first(),
            FlowState::Testing(group) => group,
            FlowState::Results(_) | FlowState::Skipped => return Err(FlowError::Finished),
        };

        let previous = self.results.insert(group, result);

        let next = match group.next() {
            Some(next) => FlowState::Testing(next),
            None => match strength_test.report(&self.results) {
                Ok(report) => FlowState::Results(report),
                Err(err) => {
                    match previous {
                        Some(previous) => self.results.insert(group, previous),
                        None => self.results.remove(group),
                    };
                    return Err(err.into());
                }
            },
        };

        self.transition(next);
        Ok(&self.state)
    }

    pub fn reset(&mut self) {
        self.results.clear();
        self.transition(FlowState::Intro);
    }

    fn transition(&mut self, state: FlowState) {
        debug!(
            "home test: {} -> {}",
            state_name(&self.state),
            state_name(&state)
        );
        self.state = state;
    }
}

impl Default for HomeTestFlow {
    fn default() -> Self {
        Self::new()
    }
}

fn state_name(state: &FlowState) -> String {
    match state {
        FlowState::Intro => "intro".to_string(),
        FlowState::Testing(group) => format!("testing {}", group.name()),
        FlowState::Results(_) => "results".to_string(),
        FlowState::Skipped => "skipped".to_string(),
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Home test already started")]
    AlreadyStarted,
    #[error("Home test already finished")]
    Finished,
    #[error(transparent)]
    Report(#[from] ReportError),
}
