#![no_main]

use brainscan::{generate_c, ParseError};
use libfuzzer_sys::fuzz_target;

fn first_problem(data: &[u8]) -> Option<ParseError> {
    let mut open = vec![];
    for (pos, c) in data.iter().enumerate() {
        match c {
            b'[' => open.push(pos),
            b']' => {
                if open.pop().is_none() {
                    return Some(ParseError::UnmatchedBracket(pos));
                }
            }
            b'>' | b'<' | b'+' | b'-' | b'.' | b',' | b'\n' => (),
            _ => return Some(ParseError::SyntaxError(pos)),
        }
    }
    open.pop().map(ParseError::UnmatchedBracket)
}

fuzz_target!(|data: &[u8]| {
    match generate_c(data, false) {
        Ok(c) => {
            assert_eq!(first_problem(data), None);
            assert!(c.ends_with("\treturn 0;\n}\n"));
        }
        Err(e) => assert_eq!(first_problem(data), Some(e)),
    }
});
