use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_displays_usage() {
    Command::cargo_bin("svgscout")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn missing_root_prints_a_short_message() {
    Command::cargo_bin("svgscout")
        .expect("binary exists")
        .args(["/definitely/not/a/real/root", "--export", "/dev/null"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project root inaccessible"));
}

#[test]
fn export_writes_the_catalog() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        temp.path().join("dot.svg"),
        r#"<svg viewBox="0 0 4 4"><circle cx="2" cy="2" r="1"/></svg>"#,
    )
    .expect("write fixture");

    let output = temp.path().join("catalog.html");
    Command::cargo_bin("svgscout")
        .expect("binary exists")
        .arg(temp.path())
        .args(["--export"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported 1 fragments"));

    assert!(output.exists());
}
