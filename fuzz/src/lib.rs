//! Fuzzing helper function

use std::collections::VecDeque;
use std::fmt::Debug;

use brainscan::instruction::Instruction;

/// Raw bytes, mostly garbage as far as the classifier is concerned.
#[derive(arbitrary::Arbitrary)]
pub struct FuzzInputSrc {
    pub code: Vec<u8>,
    pub input: VecDeque<u8>,
}

impl Debug for FuzzInputSrc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzInputSrc")
            .field("code", &self.code.escape_ascii().to_string())
            .field("input", &self.input)
            .finish()
    }
}

/// A program built from instructions, so nearly every input is valid.
#[derive(Debug, arbitrary::Arbitrary)]
pub struct FuzzInputProgram {
    pub instructions: Vec<Instruction>,
    pub input: VecDeque<u8>,
}

impl FuzzInputProgram {
    /// Render to source text. Invalid instructions become `#`.
    pub fn source(&self) -> Vec<u8> {
        self.instructions
            .iter()
            .map(|i| i.symbol().map(|c| c as u8).unwrap_or(b'#'))
            .collect()
    }
}
