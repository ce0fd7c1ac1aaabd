use std::io::Read;

use crate::{
    settings::{EofBehaviour, Settings},
    BfNum, ExecuteCallbackResult, ExecutionContext, ExecutionError,
};

#[derive(Debug, Default, PartialEq)]
pub struct ExecutionState {
    pub result: Option<Result<(), ExecutionError>>,
    pub ctx: ExecutionContext,
    pub output: Vec<u8>,
}

impl ExecutionState {
    fn new(settings: &Settings) -> Self {
        Self {
            ctx: ExecutionContext::new(settings),
            ..Default::default()
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.result, Some(Err(ExecutionError::Aborted)))
    }
}

/// Run `source` on a fresh tape, aborting after `budget` callback events.
pub fn test_execute(
    source: &[u8],
    settings: &Settings,
    input: &mut impl Read,
    budget: usize,
) -> ExecutionState {
    let mut steps = 0;
    let mut exec = ExecutionState::new(settings);
    exec.result = Some(crate::execute(
        source,
        &mut exec.ctx,
        settings.eof,
        input,
        &mut exec.output,
        &mut |_, _| {
            steps += 1;
            if steps > budget {
                ExecuteCallbackResult::Abort
            } else {
                ExecuteCallbackResult::Continue
            }
        },
    ));

    exec
}

/// Jump table interpreter to check the re-scanning one against.
///
/// Returns `None` for programs that are not well formed, as error
/// reporting differs between the two strategies.
pub fn reference_execute(
    source: &[u8],
    settings: &Settings,
    input: &mut impl Read,
    budget: usize,
) -> Option<ExecutionState> {
    let mut jumps = vec![0usize; source.len()];
    let mut stack = vec![];
    for (pos, c) in source.iter().enumerate() {
        match c {
            b'[' => stack.push(pos),
            b']' => {
                let open = stack.pop()?;
                jumps[open] = pos;
                jumps[pos] = open;
            }
            b'>' | b'<' | b'+' | b'-' | b'.' | b',' | b'\n' => (),
            _ => return None,
        }
    }
    if !stack.is_empty() {
        return None;
    }

    let mut exec = ExecutionState::new(settings);
    let mut steps = 0;
    exec.result = Some(reference_run(
        source,
        &jumps,
        &mut exec,
        settings.eof,
        input,
        &mut || {
            steps += 1;
            steps <= budget
        },
    ));
    Some(exec)
}

fn reference_run(
    source: &[u8],
    jumps: &[usize],
    exec: &mut ExecutionState,
    eof: EofBehaviour,
    input: &mut impl Read,
    tick: &mut impl FnMut() -> bool,
) -> Result<(), ExecutionError> {
    let ctx = &mut exec.ctx;
    let mut pc = 0;
    while pc < source.len() {
        if !tick() {
            return Err(ExecutionError::Aborted);
        }
        ctx.scan = pc;
        match source[pc] {
            b'>' => ctx.move_right(),
            b'<' => ctx.move_left(),
            b'+' => ctx.increment()?,
            b'-' => ctx.decrement()?,
            b'.' => exec.output.push(ctx.read()?.as_byte()),
            b',' => {
                let mut tmp = [0u8; 1];
                match input.read(&mut tmp)? {
                    0 => match eof {
                        EofBehaviour::MinusOne => ctx.write(BfNum::from(-1i8))?,
                        EofBehaviour::Zero => ctx.write(BfNum::ZERO)?,
                        EofBehaviour::Unchanged => (),
                    },
                    _ => ctx.write(tmp[0].into())?,
                }
            }
            b'[' if ctx.read()?.is_zero() => pc = jumps[pc],
            b']' if !ctx.read()?.is_zero() => pc = jumps[pc],
            _ => (),
        }
        pc += 1;
    }
    ctx.scan = pc;
    Ok(())
}
