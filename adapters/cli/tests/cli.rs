use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn maps_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("maps")
}

fn skirmish(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_skirmish"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch skirmish binary")
}

fn sample_map() -> String {
    maps_dir().join("sample.txt").display().to_string()
}

#[test]
fn classic_rules_reproduce_the_known_score() {
    let rules = maps_dir().join("classic_rules.toml").display().to_string();
    let output = skirmish(&[&sample_map(), "--config", &rules]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Combat ends after 47 full rounds\n\
         Goblins win with 590 total hit points left\n\
         Outcome: 47 * 590 = 27730\n"
    );
}

#[test]
fn search_flag_reports_the_lowest_flawless_power() {
    let output = skirmish(&[&sample_map(), "--clear-corpses", "--search-elf-power"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Elves need attack power 15 to win without losses\n"));
    assert!(stdout.ends_with("Outcome: 29 * 172 = 4988\n"));
}

#[test]
fn json_format_is_machine_readable() {
    let output = skirmish(&[
        &sample_map(),
        "--clear-corpses",
        "--show-final",
        "--format",
        "json",
    ]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(report["mode"], "combat");
    assert_eq!(report["score"], 27_730);
    assert_eq!(report["outcome"]["completed_rounds"], 47);
    assert_eq!(report["rules"]["corpses"], "clear_immediately");
    assert!(report["final_layout"]
        .as_str()
        .is_some_and(|layout| layout.starts_with("#######\n#G....#   G(200)\n")));
}

#[test]
fn invalid_maps_fail_with_a_located_error() {
    let path = env::temp_dir().join(format!("skirmish-invalid-{}.txt", std::process::id()));
    fs::write(&path, "#####\n#E?G#\n#####\n").expect("temp map written");

    let output = skirmish(&[&path.display().to_string()]);
    let _ = fs::remove_file(&path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse map"), "stderr: {stderr}");
    assert!(stderr.contains("line 2, column 3"), "stderr: {stderr}");
}

#[test]
fn harmless_goblins_are_refused_at_setup() {
    let output = skirmish(&[&sample_map(), "--goblin-attack", "0"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("map cannot host a battle"), "stderr: {stderr}");
    assert!(stderr.contains("Goblin attack power must be at least one"), "stderr: {stderr}");
}
