//! Fuzz comparing the re-scanning interpreter with a jump table one

#![no_main]

use brainscan::settings::Settings;
use brainscan::test_utils::{reference_execute, test_execute};
use brainscan_fuzz::FuzzInputProgram;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzInputProgram| {
    let src = data.source();
    let settings = Settings::default();
    let Some(reference) = reference_execute(&src, &settings, &mut data.input.clone(), 20000)
    else {
        return;
    };
    // Loop iterations count against the budget too, so give it more room.
    let exec = test_execute(&src, &settings, &mut data.input.clone(), 40000);
    if reference.is_aborted() || exec.is_aborted() {
        return;
    }
    assert_eq!(exec.output, reference.output);
    match (&exec.result, &reference.result) {
        (Some(Ok(())), Some(Ok(()))) => assert_eq!(exec.ctx, reference.ctx),
        (Some(Err(e1)), Some(Err(e2))) => assert_eq!(e1, e2),
        _ => panic!("{:?} != {:?}", exec.result, reference.result),
    }
});
