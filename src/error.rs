//! Error taxonomy for the tower solver.
//!
//! Errors fall into two groups:
//!
//! | Error | Raised by | Recoverable |
//! |-------|-----------|-------------|
//! | [`HanoiError::NotAnInteger`] | input parsing | Yes |
//! | [`HanoiError::InvalidDiskCount`] | input parsing, `RodsState::initialize` | Yes |
//! | [`HanoiError::TooManyDisks`] | input parsing, `RodsState::initialize`, `solve` | Yes |
//! | [`HanoiError::ReadFailed`] | `read_disk_count` | Yes |
//! | [`HanoiError::UnknownPeg`] | input parsing | Yes |
//! | [`HanoiError::DuplicatePeg`] | `solve_tower`, `MoveExecutor::move_disk` | Yes |
//! | [`HanoiError::EmptyPeg`] | `RodsState::top`, `MoveExecutor::move_disk` | No |
//! | [`HanoiError::InvariantViolation`] | `MoveExecutor::move_disk` | No |
//! | [`HanoiError::CorruptState`] | `RodsState::from_stacks`, `check_invariants` | No |
//!
//! Recoverable errors come from the configuration boundary and are reported
//! to the user before any move is made. The rest mean the solver (or a
//! hand-built state) is broken and the run must stop.

use crate::engine::{Disk, Peg};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HanoiError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HanoiError {
    #[error("expected an integer disk count, got '{input}'")]
    NotAnInteger { input: String },

    #[error("disk count must be a positive integer, got {count}")]
    InvalidDiskCount { count: i64 },

    #[error("disk count {count} exceeds the supported maximum of {max}")]
    TooManyDisks { count: u64, max: u32 },

    #[error("failed to read input: {reason}")]
    ReadFailed { reason: String },

    #[error("unknown peg '{input}' (expected A, B or C)")]
    UnknownPeg { input: String },

    #[error("peg {peg} is used for more than one role")]
    DuplicatePeg { peg: Peg },

    #[error("peg {peg} has no disks")]
    EmptyPeg { peg: Peg },

    #[error("cannot move disk {disk} from {from} onto smaller disk {onto} on {to}; state: {state}")]
    InvariantViolation {
        disk: Disk,
        onto: Disk,
        from: Peg,
        to: Peg,
        state: String,
    },

    #[error("corrupt peg layout: {reason}")]
    CorruptState { reason: String },
}

impl HanoiError {
    /// Returns `true` for errors caused by user input at the configuration
    /// boundary. Those are reported and the run exits without moving any disk.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HanoiError::NotAnInteger { .. }
                | HanoiError::InvalidDiskCount { .. }
                | HanoiError::TooManyDisks { .. }
                | HanoiError::ReadFailed { .. }
                | HanoiError::UnknownPeg { .. }
                | HanoiError::DuplicatePeg { .. }
        )
    }
}
