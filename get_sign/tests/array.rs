//! Replays recorded test cases through the `array` binary.
use std::{
    path::PathBuf,
    process::{Command, Output},
};

use symbolic::{KTest, KTestObject, Symbolic, KTEST_FILE_VAR};

fn replay(name: &str, i: usize, arr: [u8; 8]) -> Output {
    let mut test = KTest::new(vec!["array".to_owned()]);
    test.push_object(KTestObject::new("i", i.to_recorded()));
    test.push_object(KTestObject::new("arr", arr.to_recorded()));

    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(format!("array_{name}.ktest"));
    test.write_to(&path).unwrap();

    Command::new(env!("CARGO_BIN_EXE_array"))
        .env(KTEST_FILE_VAR, path)
        .output()
        .unwrap()
}

fn printed_sum(output: &Output) -> u16 {
    String::from_utf8_lossy(&output.stdout).trim().parse().unwrap()
}

#[test]
fn sums_prefix() {
    let output = replay("prefix", 3, [10, 20, 30, 40, 0, 0, 0, 0]);
    assert!(output.status.success());
    assert_eq!(printed_sum(&output), 60);
}

#[test]
fn index_past_the_end_sums_everything() {
    let output = replay("past_end", 1_000, [255; 8]);
    assert!(output.status.success());
    assert_eq!(printed_sum(&output), 2040);
}

#[test]
fn without_test_case_sums_nothing() {
    let output = Command::new(env!("CARGO_BIN_EXE_array"))
        .env_remove(KTEST_FILE_VAR)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(printed_sum(&output), 0);
}

#[test]
fn short_array_recording_is_a_setup_failure() {
    let mut test = KTest::new(vec!["array".to_owned()]);
    test.push_object(KTestObject::new("i", 2usize.to_recorded()));
    test.push_object(KTestObject::new("arr", vec![1u8; 4]));

    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("array_short.ktest");
    test.write_to(&path).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_array"))
        .env(KTEST_FILE_VAR, path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}
