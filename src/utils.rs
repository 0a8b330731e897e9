use crate::engine::{Disk, RodsState, MAX_DISKS};
use crate::error::{HanoiError, Result};
use std::io::BufRead;
use std::num::IntErrorKind;

/// Largest disk count the command line accepts.
///
/// `MAX_DISKS` only bounds recursion depth; `2^30 - 1` moves, each with a
/// printed snapshot, is already about as long as a run can sensibly take.
pub const PRACTICAL_MAX_DISKS: u32 = 30;

/// Parses a user-supplied disk count.
///
/// Surrounding whitespace is ignored. This is the validation gate in front of
/// the solver: anything it rejects must never reach `solve_tower`.
///
/// # Errors
/// * `HanoiError::NotAnInteger` if `input` is not an integer at all.
/// * `HanoiError::InvalidDiskCount` if the value is zero or negative.
/// * `HanoiError::TooManyDisks` if the value is above `MAX_DISKS`.
///
/// # Examples
/// ```
/// use hanoi_solver::utils::parse_disk_count;
/// use hanoi_solver::error::HanoiError;
///
/// assert_eq!(parse_disk_count(" 3\n"), Ok(3));
/// assert_eq!(parse_disk_count("-2"), Err(HanoiError::InvalidDiskCount { count: -2 }));
/// assert!(parse_disk_count("three").is_err());
/// ```
pub fn parse_disk_count(input: &str) -> Result<u32> {
    parse_disk_count_up_to(input, MAX_DISKS)
}

/// Like `parse_disk_count`, but rejects anything above `max` (itself capped
/// at `MAX_DISKS`) with `HanoiError::TooManyDisks`.
pub fn parse_disk_count_up_to(input: &str, max: u32) -> Result<u32> {
    let max = max.min(MAX_DISKS);
    let trimmed = input.trim();
    let value: i64 = trimmed.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => HanoiError::TooManyDisks {
            count: u64::MAX,
            max,
        },
        IntErrorKind::NegOverflow => HanoiError::InvalidDiskCount { count: i64::MIN },
        _ => HanoiError::NotAnInteger {
            input: trimmed.to_string(),
        },
    })?;

    if value <= 0 {
        return Err(HanoiError::InvalidDiskCount { count: value });
    }
    if value > i64::from(max) {
        return Err(HanoiError::TooManyDisks {
            count: value as u64,
            max,
        });
    }
    Ok(value as u32)
}

/// Reads one line from `input` and parses it as a disk count no larger than `max`.
///
/// An empty stream is reported the same way as an empty line.
///
/// # Errors
/// * `HanoiError::ReadFailed` if reading fails.
/// * Anything `parse_disk_count_up_to` reports.
///
/// # Examples
/// ```
/// use hanoi_solver::utils::read_disk_count;
///
/// assert_eq!(read_disk_count("4\n".as_bytes(), 30), Ok(4));
/// assert!(read_disk_count("0\n".as_bytes(), 30).is_err());
/// ```
pub fn read_disk_count<R: BufRead>(mut input: R, max: u32) -> Result<u32> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| HanoiError::ReadFailed {
            reason: e.to_string(),
        })?;
    parse_disk_count_up_to(&line, max)
}

/// Builds a `RodsState` from one string per peg, in order A, B, C.
///
/// Each string lists disk sizes from bottom to top, separated by whitespace
/// or commas. Missing trailing pegs are empty. The resulting layout must
/// satisfy both invariants.
///
/// # Errors
/// * `HanoiError::CorruptState` if more than three rows are given or the
///   layout breaks an invariant.
/// * `HanoiError::NotAnInteger` for a token that is not a disk size.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::Peg;
/// use hanoi_solver::utils::rods_from_str_array;
///
/// let state = rods_from_str_array(&["4 1", "3, 2"]).unwrap();
/// assert_eq!(state.stack(Peg::A), &[4, 1]);
/// assert_eq!(state.stack(Peg::B), &[3, 2]);
/// assert!(state.stack(Peg::C).is_empty());
///
/// assert!(rods_from_str_array(&["1 2"]).is_err()); // 2 above 1
/// ```
pub fn rods_from_str_array(rows: &[&str]) -> Result<RodsState> {
    if rows.len() > 3 {
        return Err(HanoiError::CorruptState {
            reason: format!("expected at most 3 pegs, found {}", rows.len()),
        });
    }

    let mut stacks: [Vec<Disk>; 3] = Default::default();
    for (stack, row) in stacks.iter_mut().zip(rows) {
        for token in row
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let disk = token.parse::<Disk>().map_err(|_| HanoiError::NotAnInteger {
                input: token.to_string(),
            })?;
            stack.push(disk);
        }
    }
    RodsState::from_stacks(stacks)
}
