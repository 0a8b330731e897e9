//! Core state model for the three-peg tower puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Peg`: One of the three fixed locations a disk can rest on.
//! - `RodsState`: The three disk stacks, guarding the partition and ordering invariants.
//! - `Move`: An immutable record of one completed disk relocation.
//! - `MoveExecutor`: Performs single-disk moves against a `RodsState` and reports
//!   each one to a `MoveObserver`.
use crate::error::{HanoiError, Result};
use crate::observer::MoveObserver;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// A disk size. Larger numbers are physically larger disks.
pub type Disk = u32;

/// Largest disk count accepted anywhere in the crate.
///
/// Recursion depth equals the disk count, and `2^64 - 1` is the largest move
/// count that still fits in a `u64`.
pub const MAX_DISKS: u32 = 64;

/// Identifies one of the three pegs.
///
/// Pegs are only used as keys; their declaration order carries no meaning
/// beyond giving each one a stable slot in `RodsState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Peg {
    A,
    B,
    C,
}

impl Peg {
    /// All pegs in display order.
    pub const ALL: [Peg; 3] = [Peg::A, Peg::B, Peg::C];

    fn slot(self) -> usize {
        match self {
            Peg::A => 0,
            Peg::B => 1,
            Peg::C => 2,
        }
    }

    /// Returns the peg that is neither `a` nor `b`.
    ///
    /// # Errors
    /// Returns `HanoiError::DuplicatePeg` if `a == b`.
    ///
    /// # Examples
    /// ```
    /// use hanoi_solver::engine::Peg;
    ///
    /// assert_eq!(Peg::third(Peg::A, Peg::C).unwrap(), Peg::B);
    /// assert!(Peg::third(Peg::B, Peg::B).is_err());
    /// ```
    pub fn third(a: Peg, b: Peg) -> Result<Peg> {
        if a == b {
            return Err(HanoiError::DuplicatePeg { peg: a });
        }
        Peg::ALL
            .into_iter()
            .find(|&p| p != a && p != b)
            .ok_or(HanoiError::DuplicatePeg { peg: a })
    }

    /// The single-letter label of this peg.
    pub fn label(self) -> char {
        match self {
            Peg::A => 'A',
            Peg::B => 'B',
            Peg::C => 'C',
        }
    }
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Peg {
    type Err = HanoiError;

    /// Parses `A`, `B` or `C`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "A" | "a" => Ok(Peg::A),
            "B" | "b" => Ok(Peg::B),
            "C" | "c" => Ok(Peg::C),
            other => Err(HanoiError::UnknownPeg {
                input: other.to_string(),
            }),
        }
    }
}

/// The three peg stacks, each ordered bottom to top.
///
/// Every `RodsState` that can be observed outside this module satisfies two invariants:
/// 1. Each disk in `1..=disk_count` sits on exactly one peg, exactly once.
/// 2. On every peg, disk sizes strictly decrease from bottom to top.
///
/// Only `MoveExecutor` mutates a state after it has been built.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::{Peg, RodsState};
///
/// let state = RodsState::initialize(3, Peg::A).unwrap();
/// assert_eq!(state.stack(Peg::A), &[3, 2, 1]);
/// assert_eq!(state.top(Peg::A).unwrap(), 1);
/// assert!(state.top(Peg::B).is_err());
/// assert_eq!(state.to_string(), "{A: [3, 2, 1], B: [], C: []}");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RodsState {
    stacks: [Vec<Disk>; 3],
    disk_count: u32,
}

impl RodsState {
    /// Creates a state with disks `n, n-1, ..., 1` stacked on `source`
    /// (disk `n` at the bottom) and the other two pegs empty.
    ///
    /// # Errors
    /// * `HanoiError::InvalidDiskCount` if `n == 0`.
    /// * `HanoiError::TooManyDisks` if `n > MAX_DISKS`.
    pub fn initialize(n: u32, source: Peg) -> Result<Self> {
        if n == 0 {
            return Err(HanoiError::InvalidDiskCount { count: 0 });
        }
        if n > MAX_DISKS {
            return Err(HanoiError::TooManyDisks {
                count: u64::from(n),
                max: MAX_DISKS,
            });
        }

        let mut stacks: [Vec<Disk>; 3] = Default::default();
        stacks[source.slot()] = (1..=n).rev().collect();
        Ok(RodsState {
            stacks,
            disk_count: n,
        })
    }

    /// Builds a state from explicit stacks (indexed A, B, C; each bottom to top).
    ///
    /// The disk count is the total number of disks supplied. The result is
    /// checked against both invariants, so arbitrary layouts can be loaded for
    /// testing without ever producing an invalid state.
    ///
    /// # Errors
    /// * `HanoiError::TooManyDisks` if more than `MAX_DISKS` disks are supplied.
    /// * `HanoiError::CorruptState` if a disk is missing, duplicated, out of
    ///   range, or stacked above a smaller one.
    pub fn from_stacks(stacks: [Vec<Disk>; 3]) -> Result<Self> {
        let total: usize = stacks.iter().map(Vec::len).sum();
        if total > MAX_DISKS as usize {
            return Err(HanoiError::TooManyDisks {
                count: total as u64,
                max: MAX_DISKS,
            });
        }
        let state = RodsState {
            stacks,
            disk_count: total as u32,
        };
        state.check_invariants()?;
        Ok(state)
    }

    /// Total number of disks in play.
    pub fn disk_count(&self) -> u32 {
        self.disk_count
    }

    /// The disks on `peg`, bottom to top.
    pub fn stack(&self, peg: Peg) -> &[Disk] {
        &self.stacks[peg.slot()]
    }

    /// Returns the topmost disk on `peg` without removing it.
    ///
    /// # Errors
    /// Returns `HanoiError::EmptyPeg` if the peg holds no disks.
    pub fn top(&self, peg: Peg) -> Result<Disk> {
        self.stack(peg)
            .last()
            .copied()
            .ok_or(HanoiError::EmptyPeg { peg })
    }

    /// Read-only view of all three stacks, in peg order.
    pub fn peek_all(&self) -> [(Peg, &[Disk]); 3] {
        Peg::ALL.map(|peg| (peg, self.stack(peg)))
    }

    /// `true` when every disk sits on `peg`.
    ///
    /// Because stacks are always strictly decreasing, this also means `peg`
    /// holds `n, n-1, ..., 1` from bottom to top.
    pub fn is_solved_on(&self, peg: Peg) -> bool {
        self.stack(peg).len() == self.disk_count as usize
    }

    /// Verifies the partition and ordering invariants.
    ///
    /// # Errors
    /// Returns `HanoiError::CorruptState` describing the first problem found.
    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = vec![false; self.disk_count as usize + 1];
        let mut total = 0usize;

        for (peg, stack) in self.peek_all() {
            if let Some(pair) = stack.windows(2).find(|pair| pair[0] <= pair[1]) {
                return Err(HanoiError::CorruptState {
                    reason: format!(
                        "peg {} has disk {} above disk {} in {:?}",
                        peg, pair[1], pair[0], stack
                    ),
                });
            }

            for &disk in stack {
                if disk == 0 || disk > self.disk_count {
                    return Err(HanoiError::CorruptState {
                        reason: format!(
                            "disk {} on peg {} is outside 1..={}",
                            disk, peg, self.disk_count
                        ),
                    });
                }
                if seen[disk as usize] {
                    return Err(HanoiError::CorruptState {
                        reason: format!("disk {} appears more than once", disk),
                    });
                }
                seen[disk as usize] = true;
                total += 1;
            }
        }

        // Range and uniqueness hold, so the count alone proves nothing is missing.
        if total != self.disk_count as usize {
            return Err(HanoiError::CorruptState {
                reason: format!("expected {} disks, found {}", self.disk_count, total),
            });
        }
        Ok(())
    }

    /// Moves the top disk of `from` onto `to`.
    ///
    /// All checks run before anything is mutated, so a failed transfer
    /// leaves the state exactly as it was.
    fn transfer(&mut self, from: Peg, to: Peg) -> Result<Disk> {
        if from == to {
            return Err(HanoiError::DuplicatePeg { peg: from });
        }
        let disk = self.top(from)?;
        if let Some(&onto) = self.stack(to).last() {
            if disk > onto {
                return Err(HanoiError::InvariantViolation {
                    disk,
                    onto,
                    from,
                    to,
                    state: self.to_string(),
                });
            }
        }

        self.stacks[from.slot()].pop();
        self.stacks[to.slot()].push(disk);
        Ok(disk)
    }
}

impl fmt::Display for RodsState {
    /// Formats the state as `{A: [3, 2, 1], B: [], C: []}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (peg, stack)) in self.peek_all().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:?}", peg, stack)?;
        }
        write!(f, "}}")
    }
}

/// One completed disk relocation.
///
/// `index` counts moves from 1 within a run, and `state` is the snapshot
/// taken right after the disk landed on `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub index: u64,
    pub disk: Disk,
    pub from: Peg,
    pub to: Peg,
    pub state: RodsState,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move disk {} from {} to {}", self.disk, self.from, self.to)
    }
}

/// Performs single-disk moves against a borrowed `RodsState`.
///
/// The executor holds the state and the observer exclusively for the length
/// of a run. Every successful move is numbered, counted and reported to the
/// observer together with a snapshot of the resulting state.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::{MoveExecutor, Peg, RodsState};
/// use hanoi_solver::observer::MoveLog;
///
/// let mut state = RodsState::initialize(2, Peg::A).unwrap();
/// let mut log = MoveLog::default();
/// let mut executor = MoveExecutor::new(&mut state, &mut log);
///
/// assert_eq!(executor.move_disk(Peg::A, Peg::B).unwrap(), 1);
/// // Disk 2 cannot go on top of disk 1.
/// assert!(executor.move_disk(Peg::A, Peg::B).is_err());
/// assert_eq!(executor.moves_made(), 1);
/// drop(executor);
///
/// assert_eq!(log.moves().len(), 1);
/// assert_eq!(log.moves()[0].to_string(), "Move disk 1 from A to B");
/// ```
pub struct MoveExecutor<'a> {
    state: &'a mut RodsState,
    observer: &'a mut dyn MoveObserver,
    moves_made: u64,
}

impl<'a> MoveExecutor<'a> {
    pub fn new(state: &'a mut RodsState, observer: &'a mut dyn MoveObserver) -> Self {
        MoveExecutor {
            state,
            observer,
            moves_made: 0,
        }
    }

    /// The state as it stands after the last move.
    pub fn state(&self) -> &RodsState {
        &*self.state
    }

    /// Number of successful moves performed through this executor.
    pub fn moves_made(&self) -> u64 {
        self.moves_made
    }

    /// Moves the top disk of `from` onto `to` and reports the move.
    ///
    /// # Returns
    /// The disk that was moved.
    ///
    /// # Errors
    /// * `HanoiError::EmptyPeg` if `from` has no disks.
    /// * `HanoiError::InvariantViolation` if the disk is larger than the top of `to`.
    /// * `HanoiError::DuplicatePeg` if `from == to`.
    ///
    /// On error nothing is mutated and the observer is not called.
    pub fn move_disk(&mut self, from: Peg, to: Peg) -> Result<Disk> {
        let disk = self.state.transfer(from, to)?;
        self.moves_made += 1;
        trace!(index = self.moves_made, disk, %from, %to, "moved disk");
        debug_assert!(
            self.state.check_invariants().is_ok(),
            "invariants broken after moving disk {} from {} to {}: {}",
            disk,
            from,
            to,
            self.state
        );

        let record = Move {
            index: self.moves_made,
            disk,
            from,
            to,
            state: self.state.clone(),
        };
        self.observer.on_move(&record);
        Ok(disk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::MoveLog;
    use crate::utils::rods_from_str_array;

    #[test]
    fn test_initialize_stacks_all_disks_on_source() {
        let state = RodsState::initialize(4, Peg::B).unwrap();
        assert_eq!(state.stack(Peg::A), &[] as &[Disk]);
        assert_eq!(state.stack(Peg::B), &[4, 3, 2, 1]);
        assert_eq!(state.stack(Peg::C), &[] as &[Disk]);
        assert_eq!(state.disk_count(), 4);
        assert!(state.is_solved_on(Peg::B));
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_initialize_rejects_zero_disks() {
        assert_eq!(
            RodsState::initialize(0, Peg::A),
            Err(HanoiError::InvalidDiskCount { count: 0 })
        );
    }

    #[test]
    fn test_initialize_rejects_too_many_disks() {
        assert_eq!(
            RodsState::initialize(MAX_DISKS + 1, Peg::A),
            Err(HanoiError::TooManyDisks {
                count: u64::from(MAX_DISKS + 1),
                max: MAX_DISKS
            })
        );
        assert!(RodsState::initialize(MAX_DISKS, Peg::A).is_ok());
    }

    #[test]
    fn test_top_and_empty_peg() {
        let state = RodsState::initialize(2, Peg::C).unwrap();
        assert_eq!(state.top(Peg::C), Ok(1));
        assert_eq!(state.top(Peg::A), Err(HanoiError::EmptyPeg { peg: Peg::A }));
    }

    #[test]
    fn test_peek_all_returns_pegs_in_order() {
        let state = rods_from_str_array(&["3", "2", "1"]).unwrap();
        let view = state.peek_all();
        assert_eq!(view[0], (Peg::A, &[3][..]));
        assert_eq!(view[1], (Peg::B, &[2][..]));
        assert_eq!(view[2], (Peg::C, &[1][..]));
    }

    #[test]
    fn test_display_format() {
        let state = rods_from_str_array(&["3", "", "2 1"]).unwrap();
        assert_eq!(state.to_string(), "{A: [3], B: [], C: [2, 1]}");
    }

    #[test]
    fn test_from_stacks_rejects_bad_ordering() {
        let result = RodsState::from_stacks([vec![1, 2], vec![], vec![]]);
        match result {
            Err(HanoiError::CorruptState { reason }) => {
                assert!(reason.contains("peg A has disk 2 above disk 1"), "{}", reason)
            }
            other => panic!("expected CorruptState, got {:?}", other),
        }
    }

    #[test]
    fn test_from_stacks_rejects_duplicates_and_gaps() {
        assert!(matches!(
            RodsState::from_stacks([vec![2], vec![2], vec![]]),
            Err(HanoiError::CorruptState { .. })
        ));
        // Two disks supplied but numbered 1 and 3.
        assert!(matches!(
            RodsState::from_stacks([vec![3], vec![1], vec![]]),
            Err(HanoiError::CorruptState { .. })
        ));
        assert!(matches!(
            RodsState::from_stacks([vec![0], vec![], vec![]]),
            Err(HanoiError::CorruptState { .. })
        ));
    }

    #[test]
    fn test_third_peg() {
        assert_eq!(Peg::third(Peg::A, Peg::B), Ok(Peg::C));
        assert_eq!(Peg::third(Peg::C, Peg::A), Ok(Peg::B));
        assert_eq!(Peg::third(Peg::B, Peg::C), Ok(Peg::A));
        assert_eq!(
            Peg::third(Peg::A, Peg::A),
            Err(HanoiError::DuplicatePeg { peg: Peg::A })
        );
    }

    #[test]
    fn test_peg_from_str() {
        assert_eq!("a".parse::<Peg>(), Ok(Peg::A));
        assert_eq!(" C ".parse::<Peg>(), Ok(Peg::C));
        assert_eq!(
            "D".parse::<Peg>(),
            Err(HanoiError::UnknownPeg {
                input: "D".to_string()
            })
        );
    }

    #[test]
    fn test_move_disk_reports_snapshot() {
        let mut state = RodsState::initialize(2, Peg::A).unwrap();
        let mut log = MoveLog::default();
        {
            let mut executor = MoveExecutor::new(&mut state, &mut log);
            assert_eq!(executor.move_disk(Peg::A, Peg::C), Ok(1));
            assert_eq!(executor.move_disk(Peg::A, Peg::B), Ok(2));
            assert_eq!(executor.moves_made(), 2);
        }

        let moves = log.moves();
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].index, 1);
        assert_eq!(moves[0].state.to_string(), "{A: [2], B: [], C: [1]}");
        assert_eq!(moves[1].index, 2);
        assert_eq!((moves[1].disk, moves[1].from, moves[1].to), (2, Peg::A, Peg::B));
        assert_eq!(moves[1].state, state);
    }

    #[test]
    fn test_move_from_empty_peg_fails_without_side_effects() {
        let mut state = RodsState::initialize(1, Peg::A).unwrap();
        let before = state.clone();
        let mut log = MoveLog::default();
        {
            let mut executor = MoveExecutor::new(&mut state, &mut log);
            assert_eq!(
                executor.move_disk(Peg::B, Peg::C),
                Err(HanoiError::EmptyPeg { peg: Peg::B })
            );
            assert_eq!(executor.moves_made(), 0);
        }
        assert_eq!(state, before);
        assert!(log.moves().is_empty());
    }

    #[test]
    fn test_move_larger_onto_smaller_is_rejected() {
        let mut state = rods_from_str_array(&["3", "2", "1"]).unwrap();
        let before = state.clone();
        let mut log = MoveLog::default();
        {
            let mut executor = MoveExecutor::new(&mut state, &mut log);
            let err = executor.move_disk(Peg::A, Peg::C).unwrap_err();
            assert_eq!(
                err,
                HanoiError::InvariantViolation {
                    disk: 3,
                    onto: 1,
                    from: Peg::A,
                    to: Peg::C,
                    state: "{A: [3], B: [2], C: [1]}".to_string(),
                }
            );
        }
        assert_eq!(state, before);
        assert!(log.moves().is_empty());
    }

    #[test]
    fn test_move_onto_same_peg_is_rejected() {
        let mut state = RodsState::initialize(1, Peg::A).unwrap();
        let mut log = MoveLog::default();
        let mut executor = MoveExecutor::new(&mut state, &mut log);
        assert_eq!(
            executor.move_disk(Peg::A, Peg::A),
            Err(HanoiError::DuplicatePeg { peg: Peg::A })
        );
    }

    #[test]
    fn test_move_display() {
        let state = RodsState::initialize(1, Peg::C).unwrap();
        let record = Move {
            index: 1,
            disk: 1,
            from: Peg::A,
            to: Peg::C,
            state,
        };
        assert_eq!(record.to_string(), "Move disk 1 from A to C");
    }
}
