//! Runs every program in the programs directory and checks its output.

use std::{collections::VecDeque, env, error::Error, path::PathBuf};

use brainscan::{
    settings::Settings,
    test_utils::{reference_execute, test_execute},
};

const BUDGET: usize = 5_000_000;

fn find_programs() -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut path: PathBuf = env::var("CARGO_MANIFEST_DIR")?.into();
    path.push("tests");
    path.push("programs");

    let mut results = vec![];
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some("bf") = path.extension().and_then(|x| x.to_str()) {
            results.push(path);
        }
    }
    Ok(results)
}

fn run_program(
    program: &PathBuf,
    input: Option<PathBuf>,
    expected_output: PathBuf,
) -> Result<(), Box<dyn Error>> {
    let src = std::fs::read(program)?;
    let out = std::fs::read(expected_output)?;
    let input: VecDeque<u8> = match input {
        Some(f) => std::fs::read(f)?.into(),
        None => VecDeque::new(),
    };
    let settings = Settings::default();

    let exec = test_execute(&src, &settings, &mut input.clone(), BUDGET);
    let reference = reference_execute(&src, &settings, &mut input.clone(), BUDGET)
        .ok_or("program is not well formed")?;

    assert_eq!(exec.result, Some(Ok(())));
    assert_eq!(reference.result, Some(Ok(())));
    assert_eq!(exec.output, out);
    assert_eq!(reference.output, out);
    assert_eq!(exec.ctx, reference.ctx);

    Ok(())
}

#[test]
fn test_programs() {
    let programs = find_programs().unwrap();
    assert!(!programs.is_empty());
    for program in programs {
        let in_file = program.with_extension("in");
        let in_file = if in_file.exists() {
            Some(in_file)
        } else {
            None
        };
        let out_file = program.with_extension("out");
        match run_program(&program, in_file, out_file) {
            Ok(_) => (),
            Err(err) => panic!("{err:?} {program:?}"),
        }
    }
}
