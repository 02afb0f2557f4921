//! Categorization progress indicator

use serde::Serialize;

use crate::models::ProgressSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PollState {
    Idle,
    Polling,
}

/// What the poll loop should do after a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    Continue,
    Finished,
}

/// Progress bar as last rendered
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressIndicator {
    pub visible: bool,
    pub percent: f64,
    pub state: PollState,
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self::idle()
    }
}

impl ProgressIndicator {
    pub fn idle() -> Self {
        Self {
            visible: false,
            percent: 0.0,
            state: PollState::Idle,
        }
    }

    /// Enter polling; the bar stays as it is until the first snapshot
    pub fn start(&mut self) {
        self.state = PollState::Polling;
    }

    pub fn is_polling(&self) -> bool {
        self.state == PollState::Polling
    }

    /// Update from one snapshot.
    ///
    /// Stops on `total == 0` or `current == total`, hiding the bar in both cases.
    pub fn apply(&mut self, snapshot: &ProgressSnapshot) -> PollStep {
        if snapshot.total == 0 {
            self.visible = false;
            self.state = PollState::Idle;
            return PollStep::Finished;
        }

        self.percent = snapshot.current as f64 / snapshot.total as f64 * 100.0;
        if snapshot.current == snapshot.total {
            self.visible = false;
            self.state = PollState::Idle;
            return PollStep::Finished;
        }

        self.visible = true;
        PollStep::Continue
    }

    /// Stop after a failed fetch, keeping the last rendered bar
    pub fn fail(&mut self) {
        self.state = PollState::Idle;
    }

    /// Rounded display text, e.g. "50%"
    pub fn label(&self) -> String {
        format!("{}%", self.percent.round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_then_done() {
        let mut indicator = ProgressIndicator::idle();
        indicator.start();

        let step = indicator.apply(&ProgressSnapshot { current: 5, total: 10 });
        assert_eq!(step, PollStep::Continue);
        assert!(indicator.visible);
        assert_eq!(indicator.label(), "50%");

        let step = indicator.apply(&ProgressSnapshot { current: 10, total: 10 });
        assert_eq!(step, PollStep::Finished);
        assert_eq!(indicator.percent, 100.0);
        assert!(!indicator.visible);
        assert_eq!(indicator.state, PollState::Idle);
    }

    #[test]
    fn test_zero_total_stops() {
        let mut indicator = ProgressIndicator::idle();
        indicator.start();

        assert_eq!(
            indicator.apply(&ProgressSnapshot { current: 0, total: 0 }),
            PollStep::Finished
        );
        assert!(!indicator.visible);
        assert!(!indicator.is_polling());
    }

    #[test]
    fn test_failure_keeps_last_bar() {
        let mut indicator = ProgressIndicator::idle();
        indicator.start();
        indicator.apply(&ProgressSnapshot { current: 1, total: 3 });

        indicator.fail();
        assert!(indicator.visible);
        assert_eq!(indicator.label(), "33%");
        assert_eq!(indicator.state, PollState::Idle);
    }
}
