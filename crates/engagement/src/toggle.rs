use crate::error::{EngagementError, EngagementResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub active: bool,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Confirmed,
    RolledBack,
}

/// Optimistic on/off state (a like, a favorite) shown before the backend
/// confirms it.
///
/// `begin` flips the displayed snapshot and enters `Pending`. `confirm`
/// commits it; `rollback` restores the last committed snapshot. Only one
/// update may be in flight at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimisticToggle {
    committed: Snapshot,
    displayed: Snapshot,
    phase: Phase,
}

impl OptimisticToggle {
    pub fn new(active: bool, count: u64) -> Self {
        let snapshot = Snapshot { active, count };
        Self {
            committed: snapshot,
            displayed: snapshot,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn displayed(&self) -> Snapshot {
        self.displayed
    }

    pub fn committed(&self) -> Snapshot {
        self.committed
    }

    /// Starts an update and returns the state the backend should reach.
    pub fn begin(&mut self) -> EngagementResult<Snapshot> {
        if self.phase == Phase::Pending {
            return Err(EngagementError::AlreadyPending);
        }
        let active = !self.committed.active;
        let count = if active {
            self.committed.count.saturating_add(1)
        } else {
            self.committed.count.saturating_sub(1)
        };
        self.displayed = Snapshot { active, count };
        self.phase = Phase::Pending;
        Ok(self.displayed)
    }

    pub fn confirm(&mut self) {
        if self.phase == Phase::Pending {
            self.committed = self.displayed;
            self.phase = Phase::Confirmed;
        }
    }

    pub fn rollback(&mut self) {
        if self.phase == Phase::Pending {
            self.displayed = self.committed;
            self.phase = Phase::RolledBack;
        }
    }
}
