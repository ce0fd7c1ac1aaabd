#![no_main]

use brainscan::settings::Settings;
use brainscan::test_utils::test_execute;
use brainscan::{ExecutionError, ParseError};
use brainscan_fuzz::FuzzInputSrc;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzInputSrc| {
    let mut input = data.input;
    let exec = test_execute(&data.code, &Settings::default(), &mut input, 500);
    match exec.result {
        Some(Ok(())) => assert_eq!(exec.ctx.scan, data.code.len()),
        Some(Err(err)) => match err {
            ExecutionError::Parse(ParseError::SyntaxError(pos)) => {
                assert!(!b"><+-.,[]\n".contains(&data.code[pos]));
            }
            ExecutionError::Parse(ParseError::UnmatchedBracket(pos)) => {
                assert_eq!(data.code[pos], b'[');
            }
            ExecutionError::TapeError(_) => (),
            ExecutionError::IoError(_) => (),
            ExecutionError::Aborted => (),
        },
        None => unreachable!(),
    }
});
