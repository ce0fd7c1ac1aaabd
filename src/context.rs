//! Mutable state of one interpretation run

use crate::{
    settings::Settings,
    tape::{FixedTape, Tape},
    BfNum, TapeAddr, TapeAddrError,
};

/// Tape, cursor and scan index of a run.
///
/// Owned by the caller and lent to the interpreter, so the state at the
/// point of an error is still available for diagnostics afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext<T: Tape = FixedTape> {
    pub tape: T,
    pub cursor: TapeAddr,
    /// Index of the source character currently being executed.
    pub scan: usize,
}

impl ExecutionContext<FixedTape> {
    pub fn new(settings: &Settings) -> Self {
        Self::with_tape(FixedTape::with_policy(settings.tape_policy))
    }

    /// Put the context back into its initial state.
    pub fn reset(&mut self) {
        self.tape.reset();
        self.cursor = TapeAddr::default();
        self.scan = 0;
    }
}

impl Default for ExecutionContext<FixedTape> {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl<T: Tape> ExecutionContext<T> {
    pub fn with_tape(tape: T) -> Self {
        Self {
            tape,
            cursor: TapeAddr::default(),
            scan: 0,
        }
    }

    pub fn move_right(&mut self) {
        self.cursor += 1.into();
    }

    pub fn move_left(&mut self) {
        self.cursor -= 1.into();
    }

    pub fn increment(&mut self) -> Result<(), TapeAddrError> {
        self.tape.try_modify(self.cursor, BfNum::ONE)
    }

    pub fn decrement(&mut self) -> Result<(), TapeAddrError> {
        self.tape.try_modify(self.cursor, BfNum::from(-1i8))
    }

    /// Value of the cell under the cursor.
    pub fn read(&self) -> Result<BfNum, TapeAddrError> {
        self.tape.try_get(self.cursor)
    }

    pub fn write(&mut self, value: BfNum) -> Result<(), TapeAddrError> {
        self.tape.try_set(self.cursor, value)
    }
}
