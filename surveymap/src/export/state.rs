//! Export job lifecycle.

use std::fmt;

/// Lifecycle state of one export job.
///
/// ```text
/// Idle → BoundsComputed → BudgetChecked → Fetching → Assembling → Cropping → Delivered
///                                            │
///                                            └→ Cancelled
/// any non-terminal state → Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportState {
    Idle,
    BoundsComputed,
    BudgetChecked,
    Fetching,
    Assembling,
    Cropping,
    Delivered,
    Failed,
    Cancelled,
}

impl ExportState {
    /// Delivered, Failed and Cancelled end a job.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExportState::Delivered | ExportState::Failed | ExportState::Cancelled
        )
    }

    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(&self, next: ExportState) -> bool {
        use ExportState::*;

        if self.is_terminal() {
            return false;
        }

        matches!(
            (self, next),
            (_, Failed)
                | (Idle, BoundsComputed)
                | (BoundsComputed, BudgetChecked)
                | (BudgetChecked, Fetching)
                | (Fetching, Assembling)
                | (Fetching, Cancelled)
                | (Assembling, Cropping)
                | (Cropping, Delivered)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportState::Idle => "idle",
            ExportState::BoundsComputed => "bounds_computed",
            ExportState::BudgetChecked => "budget_checked",
            ExportState::Fetching => "fetching",
            ExportState::Assembling => "assembling",
            ExportState::Cropping => "cropping",
            ExportState::Delivered => "delivered",
            ExportState::Failed => "failed",
            ExportState::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
