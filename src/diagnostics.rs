//! Post mortem report of an interpretation run

use std::fmt::Display;
use std::io::{self, Write};

use crate::{context::ExecutionContext, tape::Tape, BfNum, TapeAddr};

/// Cells per row in the tape dump.
pub const DUMP_ROW_LEN: usize = 50;

/// Snapshot of an [`ExecutionContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    pub cursor: TapeAddr,
    /// Cell under the cursor, `None` if the cursor is off the tape.
    pub cell_value: Option<BfNum>,
    pub scan: usize,
    pub cells: Vec<BfNum>,
}

impl Diagnostics {
    pub fn capture<T: Tape>(ctx: &ExecutionContext<T>) -> Self {
        Self {
            cursor: ctx.cursor,
            cell_value: ctx.read().ok(),
            scan: ctx.scan,
            cells: ctx.tape.cells().to_vec(),
        }
    }

    /// Write every cell, [`DUMP_ROW_LEN`] per line, as signed decimals each
    /// followed by `", "`.
    pub fn write_tape_dump(&self, w: &mut impl Write) -> io::Result<()> {
        for row in self.cells.chunks(DUMP_ROW_LEN) {
            for cell in row {
                write!(w, "{cell}, ")?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.cell_value {
            Some(v) => writeln!(f, "Pointer value: {v}")?,
            None => writeln!(f, "Pointer value: <off tape>")?,
        }
        writeln!(f, "Parsing index: {}", self.scan)?;
        write!(f, "Pointer position: {}", self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::Diagnostics;
    use crate::{context::ExecutionContext, BfNum};

    #[test]
    fn test_summary() {
        let mut ctx: ExecutionContext = ExecutionContext::default();
        ctx.decrement().unwrap();
        ctx.scan = 12;
        let diag = Diagnostics::capture(&ctx);
        assert_eq!(diag.cell_value, Some(BfNum::from(-1i8)));
        assert_eq!(
            diag.to_string(),
            "Pointer value: -1\nParsing index: 12\nPointer position: 0"
        );

        ctx.move_left();
        let diag = Diagnostics::capture(&ctx);
        assert_eq!(diag.cell_value, None);
        assert!(diag.to_string().starts_with("Pointer value: <off tape>\n"));
    }

    #[test]
    fn test_tape_dump() {
        let mut ctx: ExecutionContext = ExecutionContext::default();
        ctx.increment().unwrap();
        for _ in 0..50 {
            ctx.move_right();
        }
        ctx.decrement().unwrap();

        let diag = Diagnostics::capture(&ctx);
        let mut dump = vec![];
        diag.write_tape_dump(&mut dump).unwrap();
        let dump = String::from_utf8(dump).unwrap();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 600);
        assert!(lines[0].starts_with("1, 0, 0, "));
        assert!(lines[1].starts_with("-1, 0, "));
        assert_eq!(lines[2], "0, ".repeat(50));

        // Same state, same bytes.
        let mut again = vec![];
        Diagnostics::capture(&ctx)
            .write_tape_dump(&mut again)
            .unwrap();
        assert_eq!(dump.as_bytes(), again.as_slice());
    }
}
