use crate::engine::{MoveExecutor, Peg, RodsState, MAX_DISKS};
use crate::error::{HanoiError, Result};
use crate::observer::MoveObserver;
use tracing::{debug, error};

/// Outcome of a complete run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Number of single-disk moves performed. Always `2^n - 1`.
    pub moves_made: u64,
    /// The pegs after the last move; every disk sits on the target peg.
    pub final_state: RodsState,
}

/// Number of moves needed to relocate `n` disks: `2^n - 1`.
///
/// Saturates at `u64::MAX`, which is exact for `n == 64`.
///
/// # Examples
/// ```
/// use hanoi_solver::solver::minimal_move_count;
///
/// assert_eq!(minimal_move_count(0), 0);
/// assert_eq!(minimal_move_count(3), 7);
/// assert_eq!(minimal_move_count(64), u64::MAX);
/// ```
pub fn minimal_move_count(n: u32) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Relocates all `disk_count` disks from `source` to `target` and reports
/// the run to `observer`.
///
/// The observer sees the initial state, each of the `2^n - 1` moves with its
/// resulting snapshot, and finally the solved state.
///
/// # Errors
/// * `HanoiError::DuplicatePeg` if `source == target`.
/// * `HanoiError::InvalidDiskCount` / `HanoiError::TooManyDisks` for a disk
///   count outside `1..=MAX_DISKS`.
///
/// Any of these is returned before the observer is called. An
/// `EmptyPeg` or `InvariantViolation` from the middle of a run means the
/// solver is broken; it is logged and returned without a final snapshot.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::Peg;
/// use hanoi_solver::observer::MoveLog;
/// use hanoi_solver::solver::solve_tower;
///
/// let mut log = MoveLog::default();
/// let solution = solve_tower(3, Peg::A, Peg::C, &mut log).unwrap();
/// assert_eq!(solution.moves_made, 7);
/// assert_eq!(solution.final_state.stack(Peg::C), &[3, 2, 1]);
/// ```
pub fn solve_tower<O: MoveObserver>(
    disk_count: u32,
    source: Peg,
    target: Peg,
    observer: &mut O,
) -> Result<Solution> {
    let auxiliary = Peg::third(source, target)?;
    let mut state = RodsState::initialize(disk_count, source)?;
    debug!(disk_count, %source, %auxiliary, %target, "starting run");

    observer.on_initial_state(&state);
    let moves_made = {
        let mut executor = MoveExecutor::new(&mut state, &mut *observer);
        if let Err(err) = solve(disk_count, source, auxiliary, target, &mut executor) {
            error!(error = %err, state = %executor.state(), "run aborted");
            return Err(err);
        }
        executor.moves_made()
    };
    observer.on_final_state(&state);

    debug!(moves_made, "run finished");
    Ok(Solution {
        moves_made,
        final_state: state,
    })
}

/// Moves the top `n` disks of `source` onto `target`, using `auxiliary` as
/// the spare peg.
///
/// The order is what keeps every intermediate state valid: first the `n - 1`
/// smaller disks go to `auxiliary`, then disk `n` goes straight to `target`
/// (nothing smaller than it is left there), then the `n - 1` disks follow it.
/// Exactly `2^n - 1` moves are made and recursion depth is `n`.
///
/// # Errors
/// * `HanoiError::TooManyDisks` if `n > MAX_DISKS`, checked before recursing.
/// * `HanoiError::DuplicatePeg` unless `source`, `auxiliary` and `target` are
///   pairwise distinct, also checked before any move.
/// * Whatever `MoveExecutor::move_disk` reports. On a valid state that holds
///   at least `n` disks on `source`, above anything on `auxiliary` or `target`,
///   no error can occur.
pub fn solve(
    n: u32,
    source: Peg,
    auxiliary: Peg,
    target: Peg,
    executor: &mut MoveExecutor<'_>,
) -> Result<()> {
    if n > MAX_DISKS {
        return Err(HanoiError::TooManyDisks {
            count: u64::from(n),
            max: MAX_DISKS,
        });
    }
    if Peg::third(source, target)? != auxiliary {
        return Err(HanoiError::DuplicatePeg { peg: auxiliary });
    }
    if n == 0 {
        return Ok(());
    }

    solve(n - 1, source, target, auxiliary, executor)?;
    executor.move_disk(source, target)?;
    solve(n - 1, auxiliary, source, target, executor)
}
