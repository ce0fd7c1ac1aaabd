use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, ExitCode, ExitStatus},
};

use thiserror::Error;

use brainscan::{
    execute, generate_c,
    settings::{EofBehaviour, Settings, TapePolicy},
    Diagnostics, ExecuteCallbackData, ExecuteCallbackResult, ExecutionContext, ExecutionError,
    ParseError,
};
use clap::{Parser, ValueEnum};

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("{0}.")]
    ParserError(#[from] ParseError),
    #[error("Execution error: {0}")]
    ExecutionError(#[from] ExecutionError),
    #[error("C compiler failed: {0}")]
    CompilerFailed(ExitStatus),
    #[error("No input file given")]
    MissingInput,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Mode {
    /// Interpret the program
    Interpret,
    /// Interpret the program, then report the pointer and dump the tape
    Debug,
    /// Generate C code for the program
    GenC,
    /// Generate C code and build an executable with a C compiler
    Compile,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Eof {
    /// Store -1, like getchar() returning EOF
    MinusOne,
    /// Store 0
    Zero,
    /// Leave the cell unchanged
    Unchanged,
}

impl From<Eof> for EofBehaviour {
    fn from(value: Eof) -> Self {
        match value {
            Eof::MinusOne => EofBehaviour::MinusOne,
            Eof::Zero => EofBehaviour::Zero,
            Eof::Unchanged => EofBehaviour::Unchanged,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input Brainfuck source file
    #[arg(required_unless_present = "cc_version")]
    input_file: Option<PathBuf>,

    /// Select program mode
    #[arg(short, long, value_name = "MODE")]
    mode: Option<Mode>,

    /// Output file (generated C for gen-c, executable for compile)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Keep the intermediate C file in compile mode
    #[arg(long, default_value_t = false)]
    keep_c: bool,

    /// C compiler to invoke in compile mode
    #[arg(long, default_value = "gcc")]
    cc: String,

    /// What `,` stores at end of input
    #[arg(long, value_enum, default_value_t = Eof::MinusOne)]
    eof: Eof,

    /// Wrap tape accesses around instead of failing
    #[arg(long, default_value_t = false)]
    wrap_tape: bool,

    /// Where to write the tape dump
    #[arg(long, value_name = "FILE", default_value = "array.log")]
    dump_file: PathBuf,

    /// Enable debug output for interpreter/code gen
    #[arg(long, default_value_t = false)]
    debug_back_end: bool,

    /// Print the brainscan version and the version of the C compiler
    #[arg(short = 'v', long, default_value_t = false)]
    cc_version: bool,
}

/// Exit code used when the program text is malformed.
const SYNTAX_ERROR_EXIT: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &ProgramError) -> u8 {
    match err {
        ProgramError::ParserError(_) => SYNTAX_ERROR_EXIT,
        _ => 1,
    }
}

fn run(args: &Args) -> Result<(), ProgramError> {
    if args.cc_version {
        return print_versions(&args.cc);
    }
    let input_file = args.input_file.as_ref().ok_or(ProgramError::MissingInput)?;
    let source = std::fs::read(input_file)?;

    let tape_policy = if args.wrap_tape {
        TapePolicy::Wrap
    } else {
        TapePolicy::Fail
    };
    let settings = Settings::default()
        .with_tape_policy(tape_policy)
        .with_eof(args.eof.into());

    match args.mode.unwrap_or(Mode::Interpret) {
        Mode::Interpret => interpret(&source, &settings, args, false),
        Mode::Debug => interpret(&source, &settings, args, true),
        Mode::GenC => {
            let c = generate_c(&source, args.debug_back_end)?;
            match args.output {
                Some(ref path) => std::fs::write(path, c)?,
                None => print!("{c}"),
            }
            Ok(())
        }
        Mode::Compile => {
            let c = generate_c(&source, args.debug_back_end)?;
            compile(&c, args)
        }
    }
}

fn interpret(
    source: &[u8],
    settings: &Settings,
    args: &Args,
    debug: bool,
) -> Result<(), ProgramError> {
    let trace = args.debug_back_end;
    let mut ctx = ExecutionContext::new(settings);
    let result = execute(
        source,
        &mut ctx,
        settings.eof,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
        &mut |data, state| {
            if trace {
                match data {
                    ExecuteCallbackData::Instruction { pos, instr } => {
                        dbg!((pos, instr, state.cursor));
                    }
                    ExecuteCallbackData::LoopIteration { body_start } => {
                        dbg!(body_start);
                    }
                }
            }
            ExecuteCallbackResult::Continue
        },
    );

    let reported = if debug || matches!(result, Err(ExecutionError::Parse(_))) {
        report(&Diagnostics::capture(&ctx), &args.dump_file)
    } else {
        Ok(())
    };
    finish_interpret(result, reported)
}

/// Merge the outcome of a run with the outcome of reporting on it.
///
/// An error from the run takes precedence, so a syntax error keeps its exit
/// code even when the dump could not be written.
fn finish_interpret(
    result: Result<(), ExecutionError>,
    reported: Result<(), ProgramError>,
) -> Result<(), ProgramError> {
    match result {
        Ok(()) => reported,
        Err(err) => {
            if let Err(report_err) = reported {
                eprintln!("{report_err}");
            }
            Err(match err {
                ExecutionError::Parse(err) => ProgramError::ParserError(err),
                err => err.into(),
            })
        }
    }
}

fn report(diag: &Diagnostics, dump_file: &Path) -> Result<(), ProgramError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "\n\n-------------------------------------")?;
    writeln!(stdout, "{diag}")?;
    let mut file = io::BufWriter::new(std::fs::File::create(dump_file)?);
    diag.write_tape_dump(&mut file)?;
    file.flush()?;
    writeln!(stdout, "Array printed in {}\n", dump_file.display())?;
    Ok(())
}

fn compile(c: &str, args: &Args) -> Result<(), ProgramError> {
    let c_path = PathBuf::from("source.c");
    std::fs::write(&c_path, c)?;

    let mut command = Command::new(&args.cc);
    command.arg(&c_path);
    if let Some(ref output) = args.output {
        command.arg("-o").arg(output);
    }
    let status = command.status();

    if !args.keep_c {
        std::fs::remove_file(&c_path)?;
    }
    let status = status?;
    if !status.success() {
        return Err(ProgramError::CompilerFailed(status));
    }
    Ok(())
}

fn cc_version_command(cc: &str) -> Command {
    let mut command = Command::new(cc);
    command.arg("--version");
    command
}

fn print_versions(cc: &str) -> Result<(), ProgramError> {
    println!("brainscan version {}", env!("CARGO_PKG_VERSION"));
    println!("{cc} version:");
    io::stdout().flush()?;
    let status = cc_version_command(cc).status()?;
    if !status.success() {
        return Err(ProgramError::CompilerFailed(status));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use clap::Parser;

    use super::{
        cc_version_command, exit_code, finish_interpret, interpret, Args, ProgramError,
        SYNTAX_ERROR_EXIT,
    };
    use brainscan::{settings::Settings, ExecutionError, ParseError};

    fn unwritable_dump() -> String {
        std::env::temp_dir()
            .join("brainscan-no-such-dir")
            .join("array.log")
            .display()
            .to_string()
    }

    #[test]
    fn test_syntax_error_survives_failed_dump() {
        let dump = unwritable_dump();
        let args =
            Args::try_parse_from(["brainscan", "prog.bf", "--dump-file", dump.as_str()]).unwrap();
        let err = interpret(b"++#", &Settings::default(), &args, false).unwrap_err();
        assert!(matches!(
            err,
            ProgramError::ParserError(ParseError::SyntaxError(2))
        ));
        assert_eq!(exit_code(&err), SYNTAX_ERROR_EXIT);
    }

    #[test]
    fn test_failed_dump_after_clean_run() {
        let dump = unwritable_dump();
        let args =
            Args::try_parse_from(["brainscan", "prog.bf", "--dump-file", dump.as_str()]).unwrap();
        let err = interpret(b"+", &Settings::default(), &args, true).unwrap_err();
        assert!(matches!(err, ProgramError::IoError(_)));
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_run_error_wins_over_report_error() {
        let reported = Err(ProgramError::IoError(
            std::io::ErrorKind::PermissionDenied.into(),
        ));
        let err = finish_interpret(
            Err(ExecutionError::Parse(ParseError::UnmatchedBracket(0))),
            reported,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProgramError::ParserError(ParseError::UnmatchedBracket(0))
        ));
        assert!(finish_interpret(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn test_cc_version() {
        let args = Args::try_parse_from(["brainscan", "-v", "--cc", "clang"]).unwrap();
        assert!(args.cc_version);
        assert_eq!(args.input_file, None);

        let command = cc_version_command(&args.cc);
        assert_eq!(command.get_program(), OsStr::new("clang"));
        assert_eq!(
            command.get_args().collect::<Vec<_>>(),
            vec![OsStr::new("--version")]
        );

        assert!(Args::try_parse_from(["brainscan"]).is_err());
    }
}
