//! One visualization session: the normalized trace plus a cursor.
//!
//! This is the surface a renderer consumes. All reconstruction happens in
//! the constructor; navigation afterwards only moves the cursor.

use super::status::ExecutionStatus;
use super::stepper::StepNavigator;
use crate::normalizer::{CanonicalStep, TraceNormalizer};
use crate::parser::RawTrace;
use crate::utils::config::NormalizerConfig;
use crate::utils::error::NormalizeError;
use log::info;

#[derive(Debug, Clone)]
pub struct Session {
    source: Option<String>,
    steps: Vec<CanonicalStep>,
    navigator: StepNavigator,
}

impl Session {
    /// Normalize `trace` and open a session on its first step
    ///
    /// # Errors
    /// Any [`NormalizeError`]; no session is created from a partial trace.
    pub fn open(trace: &RawTrace, config: NormalizerConfig) -> Result<Self, NormalizeError> {
        let steps = TraceNormalizer::new(config).normalize(&trace.steps)?;
        info!("Opened session with {} steps", steps.len());
        Ok(Self::from_steps(trace.source.clone(), steps))
    }

    /// Wrap already-normalized steps
    pub fn from_steps(source: Option<String>, steps: Vec<CanonicalStep>) -> Self {
        let navigator = StepNavigator::new(steps.len());
        Self {
            source,
            steps,
            navigator,
        }
    }

    /// Traced program text, when the trace carried it
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn get_step(&self, index: usize) -> Option<&CanonicalStep> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[CanonicalStep] {
        &self.steps
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut StepNavigator {
        &mut self.navigator
    }

    pub fn current_index(&self) -> usize {
        self.navigator.current_index()
    }

    pub fn current_step(&self) -> Option<&CanonicalStep> {
        self.get_step(self.navigator.current_index())
    }

    /// Step before the current one (for de-emphasis by the renderer)
    pub fn previous_step(&self) -> Option<&CanonicalStep> {
        self.navigator
            .previous_index()
            .and_then(|i| self.get_step(i))
    }

    /// Step after the current one (for de-emphasis by the renderer)
    pub fn next_step(&self) -> Option<&CanonicalStep> {
        self.navigator.next_index().and_then(|i| self.get_step(i))
    }

    pub fn status(&self) -> ExecutionStatus {
        ExecutionStatus::for_step(self.current_step(), self.navigator.is_at_end())
    }

    /// Consume the session, keeping the normalized steps
    pub fn into_steps(self) -> Vec<CanonicalStep> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{EventKind, RawStep};

    fn raw_step(line: u32, event: EventKind) -> RawStep {
        RawStep {
            line: Some(line),
            event: Some(event),
            func_name: Some("main".to_string()),
            ..Default::default()
        }
    }

    fn session(steps: Vec<RawStep>) -> Session {
        Session::open(&RawTrace::new(steps), NormalizerConfig::default()).unwrap()
    }

    #[test]
    fn test_navigation_moves_current_step() {
        let mut session = session(vec![
            raw_step(1, EventKind::Step),
            raw_step(2, EventKind::Call),
            raw_step(3, EventKind::Return),
        ]);

        assert_eq!(session.total_steps(), 3);
        assert_eq!(session.current_step().unwrap().line, 1);
        assert!(session.previous_step().is_none());
        assert_eq!(session.next_step().unwrap().line, 2);

        session.navigator_mut().next();
        assert_eq!(session.current_step().unwrap().line, 2);
        assert_eq!(session.previous_step().unwrap().line, 1);

        session.navigator_mut().last();
        assert_eq!(session.current_index(), 2);
        assert!(session.next_step().is_none());
    }

    #[test]
    fn test_status_follows_event() {
        let mut session = session(vec![
            raw_step(4, EventKind::Step),
            raw_step(5, EventKind::Call),
            raw_step(6, EventKind::Return),
            raw_step(7, EventKind::Step),
        ]);

        assert_eq!(session.status(), ExecutionStatus::Executing { line: 4 });
        session.navigator_mut().go_to(1);
        assert_eq!(
            session.status(),
            ExecutionStatus::Calling {
                function: "main".to_string()
            }
        );
        session.navigator_mut().go_to(2);
        assert_eq!(
            session.status(),
            ExecutionStatus::Returning {
                function: "main".to_string()
            }
        );
        session.navigator_mut().last();
        assert_eq!(session.status(), ExecutionStatus::Completed);
    }

    #[test]
    fn test_status_on_final_exception() {
        let raw = RawStep {
            exception_msg: Some("ReferenceError: y is not defined".to_string()),
            ..raw_step(2, EventKind::Step)
        };
        let mut session = session(vec![raw_step(1, EventKind::Step), raw]);
        session.navigator_mut().last();

        let status = session.status();
        assert!(status.is_error());
        assert_eq!(
            status.to_string(),
            "Exception: ReferenceError: y is not defined"
        );
    }

    #[test]
    fn test_empty_session() {
        let session = session(Vec::new());
        assert_eq!(session.total_steps(), 0);
        assert!(session.current_step().is_none());
        assert_eq!(session.status(), ExecutionStatus::NoData);
    }
}
