//! Compiles generated C with the system compiler and checks that it behaves
//! like the interpreter: same output, same final tape, same final cursor.
//!
//! Without a `cc` on the path the test prints a notice and passes. Set
//! `BRAINSCAN_REQUIRE_CC` to turn a missing compiler into a failure.

use std::{
    collections::VecDeque,
    error::Error,
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

use brainscan::{generate_c, settings::Settings, tape::Tape, test_utils::test_execute};

const EPILOGUE: &str = "\treturn 0;\n}\n";

/// Makes the compiled program write the whole tape followed by `@<cursor>`
/// to stderr before it returns.
const DUMP_STATE: &str = "\tfwrite(array, 1, sizeof array, stderr);\n\
                          \tfprintf(stderr, \"@%ld\", (long)(ptr - array));\n";

fn have_cc() -> bool {
    Command::new("cc")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

struct Compiled {
    stdout: Vec<u8>,
    state: Vec<u8>,
}

fn run_compiled(name: &str, src: &[u8], input: &[u8]) -> Result<Compiled, Box<dyn Error>> {
    let mut dir: PathBuf = std::env::temp_dir();
    dir.push(format!("brainscan-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let c_file = dir.join("source.c");
    let exe = dir.join("a.out");
    let c = generate_c(src, false)?;
    let body = c.strip_suffix(EPILOGUE).ok_or("unexpected epilogue")?;
    std::fs::write(&c_file, format!("{body}{DUMP_STATE}{EPILOGUE}"))?;

    let status = Command::new("cc").arg(&c_file).arg("-o").arg(&exe).status()?;
    if !status.success() {
        return Err(format!("cc failed: {status}").into());
    }

    let mut child = Command::new(&exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .ok_or("no stdin")?
        .write_all(input)?;
    let output = child.wait_with_output()?;
    std::fs::remove_dir_all(&dir)?;
    Ok(Compiled {
        stdout: output.stdout,
        state: output.stderr,
    })
}

#[test]
fn test_generated_c_matches_interpreter() {
    if !have_cc() {
        if std::env::var_os("BRAINSCAN_REQUIRE_CC").is_some() {
            panic!("BRAINSCAN_REQUIRE_CC is set but no C compiler was found");
        }
        eprintln!("SKIPPED test_generated_c_matches_interpreter: no C compiler found");
        return;
    }
    let cases: &[(&str, &[u8], &[u8])] = &[
        ("empty", b"", b""),
        ("three", b"+++.", b""),
        ("negative", b"-.--.", b""),
        ("two_cells", b"++++++++>+++++++++\n<.>.<+.", b""),
        ("echo", b",.>,.>,.", b"xy"),
        ("multiply", b"+++[>++++[>+<-]<-]>>.", b""),
        ("skip", b"[-]>+[>+<-]", b""),
        ("far_cursor", b">>>>+<<", b""),
    ];
    for (name, src, input) in cases {
        let exec = test_execute(
            src,
            &Settings::default(),
            &mut VecDeque::from(input.to_vec()),
            1000,
        );
        assert_eq!(exec.result, Some(Ok(())), "{name}");
        let compiled = run_compiled(name, src, input).unwrap();
        assert_eq!(exec.output, compiled.stdout, "{name}");

        let mut expected: Vec<u8> = exec.ctx.tape.cells().iter().map(|c| c.as_byte()).collect();
        expected.extend_from_slice(format!("@{}", exec.ctx.cursor).as_bytes());
        assert_eq!(expected, compiled.state, "{name}: final tape or cursor differs");
    }
}
