//! Passive sinks for solver progress.
//!
//! A `MoveObserver` is told about the initial state, every completed move and
//! the final state. Observers only read what they are given; they cannot
//! mutate the puzzle or change the solver's control flow.
use crate::engine::{Move, RodsState};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Label used for the snapshot reported before any move.
pub const INITIAL_STATE_LABEL: &str = "initial state";
/// Label used for the snapshot reported after each move.
pub const INTERMEDIATE_STATE_LABEL: &str = "intermediate state";
/// Label used for the snapshot reported after the last move.
pub const FINAL_STATE_LABEL: &str = "final state";

/// Receives solver progress.
///
/// The state hooks are invoked by the orchestrating caller (see
/// `solver::solve_tower`), never by the recursive solver itself.
pub trait MoveObserver {
    /// Called once before the first move.
    fn on_initial_state(&mut self, _state: &RodsState) {}

    /// Called after every completed move.
    fn on_move(&mut self, record: &Move);

    /// Called once after the last move.
    fn on_final_state(&mut self, _state: &RodsState) {}
}

impl<F> MoveObserver for F
where
    F: FnMut(&Move),
{
    fn on_move(&mut self, record: &Move) {
        self(record)
    }
}

/// Writes the human-readable move report:
///
/// ```text
/// initial state: {A: [2, 1], B: [], C: []}
/// Move disk 1 from A to B
/// intermediate state: {A: [2], B: [1], C: []}
/// ...
/// final state: {A: [], B: [], C: [2, 1]}
/// ```
///
/// Write failures never reach the solver. The first one is kept and returned
/// by `finish`, and nothing more is written after it.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::Peg;
/// use hanoi_solver::observer::ConsoleObserver;
/// use hanoi_solver::solver::solve_tower;
///
/// let mut console = ConsoleObserver::new(Vec::new());
/// solve_tower(1, Peg::A, Peg::C, &mut console).unwrap();
/// let output = String::from_utf8(console.finish().unwrap()).unwrap();
/// assert_eq!(
///     output,
///     "initial state: {A: [1], B: [], C: []}\n\
///      Move disk 1 from A to C\n\
///      intermediate state: {A: [], B: [], C: [1]}\n\
///      final state: {A: [], B: [], C: [1]}\n"
/// );
/// ```
#[derive(Debug)]
pub struct ConsoleObserver<W: Write> {
    out: W,
    report_moves: bool,
    error: Option<io::Error>,
}

impl ConsoleObserver<io::Stdout> {
    /// Reports to standard output.
    pub fn stdout() -> Self {
        ConsoleObserver::new(io::stdout())
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        ConsoleObserver {
            out,
            report_moves: true,
            error: None,
        }
    }

    /// When `false`, only the initial and final snapshots are written.
    pub fn with_moves(mut self, report_moves: bool) -> Self {
        self.report_moves = report_moves;
        self
    }

    /// Flushes the writer and hands it back, or returns the first write error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_report(&mut self, report: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_fmt(report) {
            warn!(error = %err, "failed to write move report; further output suppressed");
            self.error = Some(err);
        }
    }
}

impl<W: Write> MoveObserver for ConsoleObserver<W> {
    fn on_initial_state(&mut self, state: &RodsState) {
        self.write_report(format_args!("{}: {}\n", INITIAL_STATE_LABEL, state));
    }

    fn on_move(&mut self, record: &Move) {
        if self.report_moves {
            self.write_report(format_args!(
                "{}\n{}: {}\n",
                record, INTERMEDIATE_STATE_LABEL, record.state
            ));
        }
    }

    fn on_final_state(&mut self, state: &RodsState) {
        self.write_report(format_args!("{}: {}\n", FINAL_STATE_LABEL, state));
    }
}

/// Keeps every event in memory, mostly for assertions in tests.
#[derive(Clone, Debug, Default)]
pub struct MoveLog {
    initial: Option<RodsState>,
    moves: Vec<Move>,
    final_state: Option<RodsState>,
}

impl MoveLog {
    pub fn initial_state(&self) -> Option<&RodsState> {
        self.initial.as_ref()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn final_state(&self) -> Option<&RodsState> {
        self.final_state.as_ref()
    }
}

impl MoveObserver for MoveLog {
    fn on_initial_state(&mut self, state: &RodsState) {
        self.initial = Some(state.clone());
    }

    fn on_move(&mut self, record: &Move) {
        self.moves.push(record.clone());
    }

    fn on_final_state(&mut self, state: &RodsState) {
        self.final_state = Some(state.clone());
    }
}

/// Forwards every event to `tracing` at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl MoveObserver for TracingObserver {
    fn on_initial_state(&mut self, state: &RodsState) {
        debug!(state = %state, "{}", INITIAL_STATE_LABEL);
    }

    fn on_move(&mut self, record: &Move) {
        debug!(
            index = record.index,
            disk = record.disk,
            from = %record.from,
            to = %record.to,
            state = %record.state,
            "{}",
            INTERMEDIATE_STATE_LABEL
        );
    }

    fn on_final_state(&mut self, state: &RodsState) {
        debug!(state = %state, "{}", FINAL_STATE_LABEL);
    }
}

/// Sends each event to two observers, first `.0` then `.1`.
#[derive(Clone, Debug, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: MoveObserver, B: MoveObserver> MoveObserver for Tee<A, B> {
    fn on_initial_state(&mut self, state: &RodsState) {
        self.0.on_initial_state(state);
        self.1.on_initial_state(state);
    }

    fn on_move(&mut self, record: &Move) {
        self.0.on_move(record);
        self.1.on_move(record);
    }

    fn on_final_state(&mut self, state: &RodsState) {
        self.0.on_final_state(state);
        self.1.on_final_state(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Peg;
    use crate::solver::solve_tower;

    /// Accepts a fixed number of bytes, then fails every write.
    #[derive(Debug)]
    struct FailingWriter {
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_observer_two_disks() {
        let mut console = ConsoleObserver::new(Vec::new());
        solve_tower(2, Peg::A, Peg::C, &mut console).unwrap();
        let output = String::from_utf8(console.finish().unwrap()).unwrap();
        let expected = [
            "initial state: {A: [2, 1], B: [], C: []}",
            "Move disk 1 from A to B",
            "intermediate state: {A: [2], B: [1], C: []}",
            "Move disk 2 from A to C",
            "intermediate state: {A: [], B: [1], C: [2]}",
            "Move disk 1 from B to C",
            "intermediate state: {A: [], B: [], C: [2, 1]}",
            "final state: {A: [], B: [], C: [2, 1]}",
        ];
        assert_eq!(output.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_console_observer_without_moves() {
        let mut console = ConsoleObserver::new(Vec::new()).with_moves(false);
        solve_tower(3, Peg::A, Peg::C, &mut console).unwrap();
        let output = String::from_utf8(console.finish().unwrap()).unwrap();
        assert_eq!(
            output,
            "initial state: {A: [3, 2, 1], B: [], C: []}\nfinal state: {A: [], B: [], C: [3, 2, 1]}\n"
        );
    }

    #[test]
    fn test_console_write_error_does_not_stop_solver() {
        let mut console = ConsoleObserver::new(FailingWriter { budget: 10 });
        let solution = solve_tower(4, Peg::A, Peg::B, &mut console).unwrap();
        assert_eq!(solution.moves_made, 15);
        assert!(solution.final_state.is_solved_on(Peg::B));
        let err = console.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_move_log_records_lifecycle() {
        let mut log = MoveLog::default();
        solve_tower(2, Peg::B, Peg::A, &mut log).unwrap();
        assert_eq!(
            log.initial_state().map(ToString::to_string).as_deref(),
            Some("{A: [], B: [2, 1], C: []}")
        );
        assert_eq!(log.moves().len(), 3);
        assert_eq!(
            log.final_state().map(ToString::to_string).as_deref(),
            Some("{A: [2, 1], B: [], C: []}")
        );
    }

    #[test]
    fn test_closure_observer() {
        let mut disks = Vec::new();
        let mut collect = |record: &Move| disks.push(record.disk);
        solve_tower(3, Peg::A, Peg::C, &mut collect).unwrap();
        assert_eq!(disks, vec![1, 2, 1, 3, 1, 2, 1]);
    }

    #[test]
    fn test_tee_feeds_both_observers() {
        let mut tee = Tee(MoveLog::default(), TracingObserver);
        solve_tower(2, Peg::A, Peg::C, &mut tee).unwrap();
        assert_eq!(tee.0.moves().len(), 3);
        assert!(tee.0.final_state().is_some());
    }
}
