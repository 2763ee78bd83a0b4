//! Per-export job record.

use super::state::ExportState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

static NEXT_JOB_ID: AtomicU64 = AtomicU64::new(1);

/// Rejected state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal export transition {from} -> {to}")]
pub struct InvalidTransition {
    pub from: ExportState,
    pub to: ExportState,
}

/// One export run: its id, current state and the states it went through.
#[derive(Debug)]
pub struct ExportJob {
    id: u64,
    state: ExportState,
    history: Vec<ExportState>,
    started: Instant,
}

impl ExportJob {
    /// Creates a job in [`ExportState::Idle`] with a process-unique id.
    pub fn new() -> Self {
        Self {
            id: NEXT_JOB_ID.fetch_add(1, Ordering::Relaxed),
            state: ExportState::Idle,
            history: vec![ExportState::Idle],
            started: Instant::now(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Every state entered so far, oldest first.
    pub fn history(&self) -> &[ExportState] {
        &self.history
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Moves to `next` if the lifecycle allows it.
    pub fn advance(&mut self, next: ExportState) -> Result<(), InvalidTransition> {
        if !self.state.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        debug!(job_id = self.id, from = %self.state, to = %next, "Export state change");
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// Marks the job failed unless it already ended.
    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.state = ExportState::Failed;
            self.history.push(ExportState::Failed);
        }
    }
}

impl Default for ExportJob {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_records_history() {
        let mut job = ExportJob::new();
        job.advance(ExportState::BoundsComputed).unwrap();
        job.advance(ExportState::BudgetChecked).unwrap();

        assert_eq!(job.state(), ExportState::BudgetChecked);
        assert_eq!(
            job.history(),
            &[
                ExportState::Idle,
                ExportState::BoundsComputed,
                ExportState::BudgetChecked
            ]
        );
    }

    #[test]
    fn test_illegal_advance_is_rejected() {
        let mut job = ExportJob::new();
        let err = job.advance(ExportState::Assembling).unwrap_err();
        assert_eq!(err.from, ExportState::Idle);
        assert_eq!(job.state(), ExportState::Idle);
        assert_eq!(err.to_string(), "illegal export transition idle -> assembling");
    }

    #[test]
    fn test_fail_is_idempotent_after_terminal() {
        let mut job = ExportJob::new();
        job.advance(ExportState::BoundsComputed).unwrap();
        job.fail();
        job.fail();
        assert_eq!(job.state(), ExportState::Failed);
        assert_eq!(job.history().len(), 3);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ExportJob::new().id(), ExportJob::new().id());
    }
}
