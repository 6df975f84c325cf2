use std::process::Command;

#[test]
fn init_creates_valid_toml() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_gitai"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "gitai init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let config_path = dir.path().join(".gitai.toml");
    assert!(config_path.exists(), ".gitai.toml should exist");

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[diff]"));
    assert!(content.contains("[stats]"));
    assert!(content.contains("[ticket]"));

    // Every setting is commented out, so the file parses to the defaults.
    let config: gitai_core::GitaiConfig = toml::from_str(&content).unwrap();
    assert_eq!(config.diff.max_length, 4000);
    assert_eq!(config.stats.top_patterns, 3);
    assert!(config.validate().is_ok());
}

#[test]
fn init_refuses_if_exists() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".gitai.toml"), "# existing").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_gitai"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let content = std::fs::read_to_string(dir.path().join(".gitai.toml")).unwrap();
    assert_eq!(content, "# existing");
}

#[test]
fn init_and_welcome_ignore_a_broken_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".gitai.toml"), "[diff\nmax_length = ").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_gitai"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));

    let output = Command::new(env!("CARGO_BIN_EXE_gitai"))
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Commands:"));
}
