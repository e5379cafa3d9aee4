use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/programs")
        .join(name)
}

/// run the simulator binary on a fixture pair, feeding `stdin`
fn run_sim(text: &str, data: &str, extra: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mips-sim"))
        .arg("--text")
        .arg(fixture(text))
        .arg("--data")
        .arg(fixture(data))
        .args(extra)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn simulator");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn hello_prints_and_exits_cleanly() {
    let out = run_sim("hello.text", "hello.data", &[], "");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "Hello!\n42\n");
}

#[test]
fn sum_reads_two_integers() {
    let out = run_sim("sum.text", "empty.data", &[], "19\n  23\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "42\n");
}

#[test]
fn sum_accepts_tokens_on_one_line() {
    let out = run_sim("sum.text", "empty.data", &[], "-5 8\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "3\n");
}

#[test]
fn sum_with_bad_input_fails() {
    let out = run_sim("sum.text", "empty.data", &[], "abc\n");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not an integer"));
}

#[test]
fn missing_exit_is_reported_as_failure() {
    let out = run_sim("no_exit.text", "empty.data", &[], "");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unsafe termination"));
}

#[test]
fn missing_file_aborts_before_running() {
    let out = run_sim("does_not_exist.text", "empty.data", &[], "");
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("does_not_exist.text"));
}

#[test]
fn disasm_lists_decoded_program() {
    let out = run_sim("hello.text", "hello.data", &["--disasm"], "");
    assert!(out.status.success());
    let listing = String::from_utf8_lossy(&out.stdout);
    assert_eq!(listing.lines().count(), 8);
    assert!(listing.contains("lui {opcode: 0f, rs(base): 00, rt: 04, immediate(offset): 1001}"));
    assert!(listing.contains("syscall {opcode: 00, code: 000000, funct: 0c}"));
}

#[test]
fn dump_regs_shows_final_state() {
    let out = run_sim("hello.text", "hello.data", &["--dump-regs"], "");
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("$29 = 0x7fffeffc"));
    assert!(stderr.contains("$2  = 0x0000000a"));
}

#[test]
fn instruction_limit_from_env() {
    let out = Command::new(env!("CARGO_BIN_EXE_mips-sim"))
        .arg("--text")
        .arg(fixture("hello.text"))
        .arg("--data")
        .arg(fixture("hello.data"))
        .env("MIPS_SIM_MAX_INSNS", "2")
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("instruction limit of 2"));
}
