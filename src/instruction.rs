//! Instruction classification, shared by the interpreter and the code generator.

use thiserror::Error;

/// One source character, classified.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Instruction {
    /// `>`
    MoveRight,
    /// `<`
    MoveLeft,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopOpen,
    /// `]`
    LoopClose,
    /// Line feed, ignored.
    Newline,
    /// Anything else. Carries the position of the character.
    Invalid(usize),
}

/// Classify the character `c` found at `pos` in the source.
pub fn classify(pos: usize, c: u8) -> Instruction {
    match c {
        b'>' => Instruction::MoveRight,
        b'<' => Instruction::MoveLeft,
        b'+' => Instruction::Increment,
        b'-' => Instruction::Decrement,
        b'.' => Instruction::Output,
        b',' => Instruction::Input,
        b'[' => Instruction::LoopOpen,
        b']' => Instruction::LoopClose,
        b'\n' => Instruction::Newline,
        _ => Instruction::Invalid(pos),
    }
}

impl Instruction {
    /// Source character for this instruction, if it has a fixed one.
    pub fn symbol(&self) -> Option<char> {
        match self {
            Instruction::MoveRight => Some('>'),
            Instruction::MoveLeft => Some('<'),
            Instruction::Increment => Some('+'),
            Instruction::Decrement => Some('-'),
            Instruction::Output => Some('.'),
            Instruction::Input => Some(','),
            Instruction::LoopOpen => Some('['),
            Instruction::LoopClose => Some(']'),
            Instruction::Newline => Some('\n'),
            Instruction::Invalid(_) => None,
        }
    }
}

/// Errors in the program text
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// Character that is not an instruction.
    #[error("Syntax error on character {0}")]
    SyntaxError(usize),
    /// Loop bracket without a partner.
    #[error("Unmatched loop bracket on character {0}")]
    UnmatchedBracket(usize),
}

impl ParseError {
    /// Scan index the error was found at.
    pub fn position(&self) -> usize {
        match *self {
            ParseError::SyntaxError(pos) | ParseError::UnmatchedBracket(pos) => pos,
        }
    }
}

/// Source text of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Program<'src> {
    source: &'src [u8],
}

impl<'src> Program<'src> {
    pub fn new(source: &'src [u8]) -> Self {
        Self { source }
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Classified instruction at `idx`, `None` past the end of the program.
    pub fn instruction_at(&self, idx: usize) -> Option<Instruction> {
        self.source.get(idx).map(|c| classify(idx, *c))
    }

    /// All instructions with their positions.
    pub fn instructions(&self) -> impl Iterator<Item = (usize, Instruction)> + 'src {
        let source = self.source;
        source
            .iter()
            .enumerate()
            .map(|(pos, c)| (pos, classify(pos, *c)))
    }
}

/// Something that gives meaning to instructions.
///
/// Loops are delegated entirely to the implementation: the interpreter
/// re-scans the body, the code generator only emits structure.
pub(crate) trait Backend {
    type Error: From<ParseError>;

    fn move_right(&mut self) -> Result<(), Self::Error>;
    fn move_left(&mut self) -> Result<(), Self::Error>;
    fn increment(&mut self) -> Result<(), Self::Error>;
    fn decrement(&mut self) -> Result<(), Self::Error>;
    fn output(&mut self) -> Result<(), Self::Error>;
    fn input(&mut self) -> Result<(), Self::Error>;
    fn loop_open(&mut self) -> Result<(), Self::Error>;
    fn loop_close(&mut self) -> Result<(), Self::Error>;
}

/// Hand one instruction to a backend.
pub(crate) fn dispatch<B: Backend>(backend: &mut B, instr: Instruction) -> Result<(), B::Error> {
    match instr {
        Instruction::MoveRight => backend.move_right(),
        Instruction::MoveLeft => backend.move_left(),
        Instruction::Increment => backend.increment(),
        Instruction::Decrement => backend.decrement(),
        Instruction::Output => backend.output(),
        Instruction::Input => backend.input(),
        Instruction::LoopOpen => backend.loop_open(),
        Instruction::LoopClose => backend.loop_close(),
        Instruction::Newline => Ok(()),
        Instruction::Invalid(pos) => Err(ParseError::SyntaxError(pos).into()),
    }
}
