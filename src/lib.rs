//! # Hanoi Solver Library
//!
//! This library moves a stack of differently sized disks from one peg to
//! another, one disk at a time, never placing a larger disk on a smaller one.
//! It uses the classic recursive decomposition, which needs exactly `2^n - 1`
//! moves for `n` disks.
//!
//! It is used by two binaries:
//! - `hanoi`: Reads a disk count (flag or prompt) and prints every move with
//!   the resulting peg layout.
//! - `solution_auditor`: Solves randomly drawn configurations and checks
//!   every intermediate state.
//!
//! ## Modules
//! - `engine`: Pegs, the peg/disk state (`RodsState`) and the `MoveExecutor`
//!   that performs single moves and emits `Move` records.
//! - `solver`: The recursive `solve` and the `solve_tower` entry point.
//! - `observer`: The `MoveObserver` trait and ready-made observers.
//! - `error`: The `HanoiError` taxonomy.
//! - `utils`: Parsing helpers for disk counts and peg layouts.

pub mod engine;
pub mod error;
pub mod observer;
pub mod solver;
pub mod utils;
