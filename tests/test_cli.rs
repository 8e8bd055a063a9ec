use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

const RING: &str = "
multiplicities: [2, 2, 2, 2]
exchange:
  - { centers: [0, 1], value: 1.0 }
  - { centers: [1, 2], value: 1.0 }
  - { centers: [2, 3], value: 1.0 }
  - { centers: [3, 0], value: 1.0 }
symmetries:
  - { group: D4, generators: [[1, 2, 3, 0], [0, 3, 2, 1]] }
reduction:
  tz_sorter: true
  positive_projections: true
  non_abelian_simplifier: true
";

fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("spinblock-{}-{}.yml",
                                            name, std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

fn run(config: &PathBuf) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spinblock"))
        .arg(format!("--config={}", config.display()))
        .arg("--observable-s2")
        .env("RUST_LOG", "info")
        .output()
        .unwrap()
}

#[test]
fn test_ring() {
    let config = write_config("ring", RING);
    let output = run(&config);
    fs::remove_file(&config).unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "{}", stderr);
    assert!(stdout.contains("ground_energy: "), "{}", stdout);
    assert!(stdout.contains("s2: "), "{}", stdout);
    // reduction steps are logged
    assert!(stderr.contains("TzSorter: "), "{}", stderr);
    assert!(stderr.contains("Symmetrizer(D4): "), "{}", stderr);
}

#[test]
fn test_not_invariant() {
    let config = write_config("bent", &RING.replace("[3, 0], value: 1.0",
                                                    "[3, 0], value: 0.5"));
    let output = run(&config);
    fs::remove_file(&config).unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error: "));
}
