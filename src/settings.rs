//! Settings controlling how a program is run

/// What happens when the cursor addresses a cell outside the tape.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum TapePolicy {
    /// Abort execution with a tape error.
    #[default]
    Fail,
    /// Wrap the address around the tape length.
    Wrap,
}

/// Value stored by `,` when the input stream is exhausted.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum EofBehaviour {
    /// Store -1, which is what `getchar()` returning `EOF` leaves in a `char`.
    #[default]
    MinusOne,
    /// Store 0.
    Zero,
    /// Leave the cell as it was.
    Unchanged,
}

/// Settings for one interpretation run
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Settings {
    pub tape_policy: TapePolicy,
    pub eof: EofBehaviour,
}

impl Settings {
    pub fn with_tape_policy(self, tape_policy: TapePolicy) -> Self {
        Self {
            tape_policy,
            ..self
        }
    }

    pub fn with_eof(self, eof: EofBehaviour) -> Self {
        Self { eof, ..self }
    }
}
