//! Code generation

use std::iter::repeat;

use crate::{
    instruction::{dispatch, Backend, ParseError, Program},
    tape::TAPE_SIZE,
};

/// Generate C code
///
/// The program is only walked once: every loop becomes one `while` block,
/// nothing is executed. Tracing adds `#line` directives holding the
/// (1-based) character index of each instruction.
pub fn generate_c(source: &[u8], trace: bool) -> Result<String, ParseError> {
    let mut c_program = CProgram::new(trace);
    for (pos, instr) in Program::new(source).instructions() {
        c_program.pos = pos;
        dispatch(&mut c_program, instr)?;
    }
    c_program.finish()
}

/// A C program under construction.
#[derive(Debug)]
struct CProgram {
    lines: Vec<String>,
    /// Positions of the currently open `[`, innermost last.
    open_loops: Vec<usize>,
    /// Position of the instruction being translated.
    pos: usize,
    trace: bool,
}

impl CProgram {
    fn new(trace: bool) -> Self {
        Self {
            lines: vec![],
            open_loops: vec![],
            pos: 0,
            trace,
        }
    }

    fn indentation(&self) -> usize {
        self.open_loops.len() + 1
    }

    fn emit(&mut self, statement: &str) {
        if self.trace {
            self.lines
                .push(format!("{}#line {}", indent(self.indentation()), self.pos + 1));
        }
        self.lines
            .push(format!("{}{}", indent(self.indentation()), statement));
    }

    fn finish(self) -> Result<String, ParseError> {
        if let Some(&open) = self.open_loops.last() {
            return Err(ParseError::UnmatchedBracket(open));
        }
        let mut s: String = "/* C code auto-generated by brainscan */\n\n".into();
        s += "#include <stdio.h>\n\nint main()\n{\n";
        s += format!("\tchar array[{TAPE_SIZE}] = {{0}}; char *ptr = array;\n\n").as_str();
        for line in &self.lines {
            s += line;
            s += "\n";
        }
        s += "\treturn 0;\n}\n";
        Ok(s)
    }
}

impl Backend for CProgram {
    type Error = ParseError;

    fn move_right(&mut self) -> Result<(), ParseError> {
        self.emit("++ptr;");
        Ok(())
    }

    fn move_left(&mut self) -> Result<(), ParseError> {
        self.emit("--ptr;");
        Ok(())
    }

    fn increment(&mut self) -> Result<(), ParseError> {
        self.emit("++*ptr;");
        Ok(())
    }

    fn decrement(&mut self) -> Result<(), ParseError> {
        self.emit("--*ptr;");
        Ok(())
    }

    fn output(&mut self) -> Result<(), ParseError> {
        self.emit("putchar(*ptr);");
        Ok(())
    }

    fn input(&mut self) -> Result<(), ParseError> {
        self.emit("*ptr = getchar();");
        Ok(())
    }

    fn loop_open(&mut self) -> Result<(), ParseError> {
        self.emit("while(*ptr) {");
        self.open_loops.push(self.pos);
        Ok(())
    }

    fn loop_close(&mut self) -> Result<(), ParseError> {
        if self.open_loops.pop().is_none() {
            return Err(ParseError::UnmatchedBracket(self.pos));
        }
        self.emit("}");
        Ok(())
    }
}

/// Compute the indentation string for a given indentation level.
fn indent(i: usize) -> String {
    String::from_iter(repeat("\t").take(i))
}
