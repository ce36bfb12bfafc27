// Exit status and output streams of the compiled binary.
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_image-scale"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch image-scale")
}

fn unique_temp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("imgscale_bin_{}_{}", nanos, name))
}

#[test]
fn no_arguments_prints_usage_and_succeeds() {
    let output = run_binary(&[]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--width"));
    assert!(output.stdout.is_empty());
}

#[test]
fn help_flag_prints_usage_and_succeeds() {
    for flag in ["-h", "--help"] {
        let output = run_binary(&[flag]);

        assert_eq!(output.status.code(), Some(0));
        assert!(String::from_utf8_lossy(&output.stderr).contains("--height"));
    }
}

#[test]
fn malformed_width_prints_usage_and_succeeds() {
    let output = run_binary(&["-W", "abc", "in.png", "out.png"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(!output.stderr.is_empty());
}

#[test]
fn version_goes_to_stdout() {
    let output = run_binary(&["--version"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_input_exits_with_input_open_code() {
    let input = unique_temp_file("missing.png");
    let out = unique_temp_file("out.png");
    let input_arg = input.to_string_lossy().into_owned();
    let out_arg = out.to_string_lossy().into_owned();

    let output = run_binary(&["-W", "100", &input_arg, &out_arg]);

    assert_eq!(output.status.code(), Some(2));
    assert!(!output.stderr.is_empty());
    assert!(!out.exists());
}

#[test]
fn broken_config_exits_with_config_code() {
    let config = unique_temp_file("broken.json");
    std::fs::write(&config, "{ not json").expect("write config");
    let config_arg = config.to_string_lossy().into_owned();

    let output = run_binary(&["-c", &config_arg, "in.png", "out.png"]);

    assert_eq!(output.status.code(), Some(10));
}
