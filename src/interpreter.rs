use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;

use thiserror::Error;

use crate::context::ExecutionContext;
use crate::instruction::{dispatch, Backend, Instruction, ParseError, Program};
use crate::settings::EofBehaviour;
use crate::tape::Tape;
use crate::BfNum;
use crate::TapeAddrError;

/// Error type for execution
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Malformed program text.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// Tape pointer error.
    #[error("Tape pointer error: {0}")]
    TapeError(#[from] TapeAddrError),
    /// Io error during program execution.
    #[error("Unexpected IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// Aborted by callback
    #[error("Callback aborted execution")]
    Aborted,
}

impl PartialEq for ExecutionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Parse(l0), Self::Parse(r0)) => l0 == r0,
            (Self::TapeError(l0), Self::TapeError(r0)) => l0 == r0,
            (Self::IoError(l0), Self::IoError(r0)) => l0.kind() == r0.kind(),
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

/// Data sent to execution callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteCallbackData {
    /// About to execute the instruction at `pos`
    Instruction { pos: usize, instr: Instruction },
    /// Starting another walk over a loop body
    LoopIteration { body_start: usize },
}

/// Reply type for callback
pub enum ExecuteCallbackResult {
    /// Continue execution
    Continue,
    /// Abort execution
    Abort,
}

/// Interpret `source` against `ctx`.
///
/// The scan starts at index 0; the tape and cursor are used as found, so
/// pass a fresh (or reset) context for a fresh run. On error the context is
/// left exactly as it was when the error happened. `eof` decides what a
/// `,` stores once `input` is exhausted; the tape bounds policy lives in
/// the context's tape.
pub fn execute<TapeT: Tape, R: Read, W: Write, F>(
    source: &[u8],
    ctx: &mut ExecutionContext<TapeT>,
    eof: EofBehaviour,
    input: &mut R,
    output: &mut W,
    callback: &mut F,
) -> Result<(), ExecutionError>
where
    F: FnMut(ExecuteCallbackData, &ExecutionContext<TapeT>) -> ExecuteCallbackResult,
{
    let mut machine = Machine {
        program: Program::new(source),
        ctx,
        input,
        output,
        callback,
        eof,
    };
    machine.ctx.scan = 0;
    while let Some(instr) = machine.program.instruction_at(machine.ctx.scan) {
        machine.step(instr)?;
        machine.ctx.scan += 1;
    }
    machine.output.flush()?;
    Ok(())
}

/// Interpreter state borrowed for the duration of one [`execute`] call.
struct Machine<'a, 'src, TapeT: Tape, R, W, F> {
    program: Program<'src>,
    ctx: &'a mut ExecutionContext<TapeT>,
    input: &'a mut R,
    output: &'a mut W,
    callback: &'a mut F,
    eof: EofBehaviour,
}

impl<TapeT, R, W, F> Machine<'_, '_, TapeT, R, W, F>
where
    TapeT: Tape,
    R: Read,
    W: Write,
    F: FnMut(ExecuteCallbackData, &ExecutionContext<TapeT>) -> ExecuteCallbackResult,
{
    fn notify(&mut self, data: ExecuteCallbackData) -> Result<(), ExecutionError> {
        match (self.callback)(data, &*self.ctx) {
            ExecuteCallbackResult::Continue => Ok(()),
            ExecuteCallbackResult::Abort => Err(ExecutionError::Aborted),
        }
    }

    fn step(&mut self, instr: Instruction) -> Result<(), ExecutionError> {
        self.notify(ExecuteCallbackData::Instruction {
            pos: self.ctx.scan,
            instr,
        })?;
        dispatch(self, instr)
    }

    /// Move the scan from the `[` at `open` onto its matching `]`.
    ///
    /// Skipped characters are still classified, so a skipped body cannot
    /// hide a syntax error.
    fn skip_loop(&mut self, open: usize) -> Result<(), ExecutionError> {
        let mut depth = 0usize;
        loop {
            self.ctx.scan += 1;
            match self.program.instruction_at(self.ctx.scan) {
                None => return Err(ParseError::UnmatchedBracket(open).into()),
                Some(Instruction::LoopOpen) => depth += 1,
                Some(Instruction::LoopClose) if depth == 0 => return Ok(()),
                Some(Instruction::LoopClose) => depth -= 1,
                Some(Instruction::Invalid(pos)) => {
                    return Err(ParseError::SyntaxError(pos).into());
                }
                Some(_) => (),
            }
        }
    }
}

impl<TapeT, R, W, F> Backend for Machine<'_, '_, TapeT, R, W, F>
where
    TapeT: Tape,
    R: Read,
    W: Write,
    F: FnMut(ExecuteCallbackData, &ExecutionContext<TapeT>) -> ExecuteCallbackResult,
{
    type Error = ExecutionError;

    fn move_right(&mut self) -> Result<(), ExecutionError> {
        self.ctx.move_right();
        Ok(())
    }

    fn move_left(&mut self) -> Result<(), ExecutionError> {
        self.ctx.move_left();
        Ok(())
    }

    fn increment(&mut self) -> Result<(), ExecutionError> {
        Ok(self.ctx.increment()?)
    }

    fn decrement(&mut self) -> Result<(), ExecutionError> {
        Ok(self.ctx.decrement()?)
    }

    fn output(&mut self) -> Result<(), ExecutionError> {
        let tmp: [u8; 1] = [self.ctx.read()?.as_byte()];
        self.output.write_all(&tmp)?;
        Ok(())
    }

    fn input(&mut self) -> Result<(), ExecutionError> {
        let mut tmp: [u8; 1] = [0; 1];
        // A prompt without a trailing newline would otherwise not be visible.
        self.output.flush()?;
        let n_bytes = loop {
            match self.input.read(&mut tmp) {
                // A signal arrived before any data did.
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                result => break result?,
            }
        };
        match n_bytes {
            0 => match self.eof {
                EofBehaviour::MinusOne => self.ctx.write(BfNum::from(-1i8))?,
                EofBehaviour::Zero => self.ctx.write(BfNum::ZERO)?,
                EofBehaviour::Unchanged => (),
            },
            _ => self.ctx.write(tmp[0].into())?,
        }
        Ok(())
    }

    /// Run the loop whose `[` is under the scan.
    ///
    /// Every iteration re-walks the body from its first character until the
    /// `]` closing this loop is under the scan. Inner loops recurse through
    /// [`Machine::step`] and leave the scan on their own `]`, so the walk
    /// never mistakes an inner `]` for its own.
    fn loop_open(&mut self) -> Result<(), ExecutionError> {
        let open = self.ctx.scan;
        let body_start = open + 1;
        if self.ctx.read()?.is_zero() {
            return self.skip_loop(open);
        }
        loop {
            self.ctx.scan = body_start;
            self.notify(ExecuteCallbackData::LoopIteration { body_start })?;
            loop {
                match self.program.instruction_at(self.ctx.scan) {
                    None => return Err(ParseError::UnmatchedBracket(open).into()),
                    Some(Instruction::LoopClose) => break,
                    Some(instr) => self.step(instr)?,
                }
                self.ctx.scan += 1;
            }
            if self.ctx.read()?.is_zero() {
                return Ok(());
            }
        }
    }

    fn loop_close(&mut self) -> Result<(), ExecutionError> {
        // Only reached for a `]` outside of any loop, which is ignored.
        Ok(())
    }
}
