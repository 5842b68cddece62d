//! End-to-end runs of the `filter-records` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(records: &str, ids: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("records.csv"), records).unwrap();
        fs::write(dir.path().join("ids.txt"), ids).unwrap();
        Fixture { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Run with `-f ids.txt records.csv` plus `extra` options.
    fn run(&self, extra: &[&str]) -> Output {
        let mut args = extra.to_vec();
        args.extend(["-f", "ids.txt", "records.csv"]);
        run_raw(self.dir.path(), &args)
    }
}

fn stdout(output: &Output) -> &str {
    std::str::from_utf8(&output.stdout).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn run_raw(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_filter-records"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn selects_records_in_filter_order() {
    let fx = Fixture::new("A,1\nB,2\nC,3\n", "B\nA\n");
    let out = fx.run(&[]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "B,2\nA,1\n");
}

#[test]
fn layout_drops_missing_columns_and_warns_on_unknown_ids() {
    let fx = Fixture::new("A,1,x\nB,2\n", "A\nZ\nB\n");
    let out = fx.run(&["-l", "0,2"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "A,x\nB\n");
    assert!(stderr(&out).contains("Unknown record Z"));
}

#[test]
fn layout_past_every_column_writes_empty_line() {
    let fx = Fixture::new("A,1\n", "A\n");
    let out = fx.run(&["-l", "5"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "\n");
}

#[test]
fn non_utf8_bytes_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("records.csv"), b"A,1\nB,Caf\xe9\n\xe9t\xe9,3\n").unwrap();
    fs::write(dir.path().join("ids.txt"), b"\xe9t\xe9\n\xff\nB\nA\n").unwrap();

    let out = run_raw(dir.path(), &["-f", "ids.txt", "records.csv"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(out.stdout, b"\xe9t\xe9,3\nB,Caf\xe9\nA,1\n");
}

#[test]
fn unrequested_non_utf8_record_is_harmless() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("records.csv"), b"A,1\nB,Caf\xe9\n").unwrap();
    fs::write(dir.path().join("ids.txt"), "A\n").unwrap();

    let out = run_raw(dir.path(), &["-f", "ids.txt", "records.csv"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "A,1\n");
}

#[test]
fn duplicate_ids_keep_last_record() {
    let fx = Fixture::new("A,1\nA,9\n", "A\n");
    assert_eq!(stdout(&fx.run(&[])), "A,9\n");
}

#[test]
fn empty_filter_file_succeeds_with_no_output() {
    let fx = Fixture::new("A,1\n", "");
    let out = fx.run(&[]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
}

#[test]
fn id_column_option() {
    let fx = Fixture::new("x,A,1\n", "A\n");
    assert_eq!(stdout(&fx.run(&["-i", "1"])), "x,A,1\n");
}

#[test]
fn writes_output_file() {
    let fx = Fixture::new("A,1\nB,2\n", "B\n");
    fs::write(fx.path("out.csv"), "old contents\nmore\n").unwrap();

    let out = fx.run(&["-o", "out.csv"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert_eq!(fs::read_to_string(fx.path("out.csv")).unwrap(), "B,2\n");
}

#[test]
fn full_filter_round_trips_record_file() {
    let records = "A,1,\"x,y\"\nB,\"two\nlines\"\nC,3\n";
    let fx = Fixture::new(records, "A\nB\nC\n");
    assert_eq!(stdout(&fx.run(&[])), records);
}

#[test]
fn repeated_runs_are_identical() {
    let fx = Fixture::new("A,1,x\nB,2\nC,3\n", "C\nZ\nA\nB\n");
    let first = fx.run(&["-l", "2,0"]);
    let second = fx.run(&["-l", "2,0"]);
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.status.code(), second.status.code());
}

#[test]
fn logs_checkpoints_to_stderr() {
    let fx = Fixture::new("A,1\n", "A\n");
    let err = stderr(&fx.run(&[]));
    assert!(err.contains("Reading record file records.csv"), "{err}");
    assert!(err.contains("Done!"), "{err}");
}

#[test]
fn short_record_fails_the_run() {
    let fx = Fixture::new("x,A\ny\n", "A\n");
    let out = fx.run(&["-i", "1"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("no ID in column 1"));
}

#[test]
fn missing_record_file_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ids.txt"), "A\n").unwrap();
    let out = run_raw(dir.path(), &["-f", "ids.txt", "absent.csv"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("absent.csv"));
}

#[test]
fn empty_filter_name_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_raw(dir.path(), &["-f", "", "a.csv"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("ID filter file name not specified!"));
}

#[test]
fn usage_errors() {
    let dir = tempfile::tempdir().unwrap();

    let out = run_raw(dir.path(), &["-f", "ids.txt"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("none specified"));

    let out = run_raw(dir.path(), &["-f", "ids.txt", "a.csv", "b.csv"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("b.csv"));

    let out = run_raw(dir.path(), &["a.csv"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("ID filter file name not specified!"));

    let out = run_raw(dir.path(), &["-f", "ids.txt", "-i", "x", "a.csv"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn help_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_raw(dir.path(), &["--help"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("--filter"));
}
