//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

fn run_playport(args: &[&str], cwd: &Path) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_playport");
    Command::new(bin)
        .args(args)
        .current_dir(cwd)
        .env_remove("INPUT_FOLDER")
        .env_remove("OUTPUT_FOLDER")
        .env_remove("OPENAI_API_KEY")
        .env_remove("PLAYPORT_RECORD")
        .output()
        .expect("failed to run playport binary")
}

const CASSETTE: &str = r#"name: cli
recorded_at: 2025-03-15T14:30:00Z
commit: unknown
interactions:
  - seq: 0
    port: llm
    method: complete
    input: {}
    output:
      Ok:
        text: "```typescript\nexport class CheckoutPage {}\n```\n---*---\n"
"#;

#[test]
fn help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_playport(&["--help"], dir.path());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for command in ["init", "pages", "tests", "all"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn unknown_subcommand_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_playport(&["translate"], dir.path());
    assert!(!output.status.success());
}

#[test]
fn missing_api_key_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_playport(&["pages", "--input", "."], dir.path());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("OPENAI_API_KEY"));
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_playport(&["pages", "--api-key", "sk-test"], dir.path());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("--input"));
}

#[test]
fn init_scaffolds_sibling_output_folder() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("checkout");
    std::fs::create_dir_all(&input).unwrap();
    std::fs::write(
        input.join("pom.xml"),
        "<project><artifactId>checkout</artifactId><version>2.0.0</version></project>",
    )
    .unwrap();

    let output = run_playport(&["init", "--input", "checkout"], dir.path());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Initialized checkout 2.0.0"));
    assert!(dir.path().join("trans-checkout/package.json").exists());
    assert!(dir.path().join("trans-checkout/playwright.config.ts").exists());
}

#[test]
fn pages_prints_summary_from_replayed_response() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shop");
    std::fs::create_dir_all(input.join("src/main/java")).unwrap();
    std::fs::write(input.join("src/main/java/CheckoutPage.java"), "class CheckoutPage {}").unwrap();
    std::fs::write(dir.path().join("llm.cassette.yaml"), CASSETTE).unwrap();

    let output = run_playport(
        &["pages", "--input", "shop", "--output", "out", "--replay-llm", "llm.cassette.yaml"],
        dir.path(),
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("CheckoutPage.java"));
    let written = std::fs::read_to_string(dir.path().join("out/src/pages/CheckoutPage.ts")).unwrap();
    assert_eq!(written, "export class CheckoutPage {}");
}

#[test]
fn all_reports_exhausted_cassette_as_generation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shop");
    std::fs::create_dir_all(input.join("src/main/java")).unwrap();
    std::fs::create_dir_all(input.join("src/test/java")).unwrap();
    std::fs::write(
        input.join("pom.xml"),
        "<project><artifactId>shop</artifactId><version>1.0.0</version></project>",
    )
    .unwrap();
    std::fs::write(input.join("src/main/java/CheckoutPage.java"), "class CheckoutPage {}").unwrap();
    std::fs::write(input.join("src/test/java/CheckoutTest.java"), "class CheckoutTest {}").unwrap();
    std::fs::write(dir.path().join("llm.cassette.yaml"), CASSETTE).unwrap();

    let output = run_playport(
        &["all", "--input", "shop", "--output", "out", "--replay-llm", "llm.cassette.yaml"],
        dir.path(),
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1), "{stderr}");
    assert!(stderr.contains("generation service failed"));
    assert!(stderr.contains("Cassette exhausted"));
    assert!(dir.path().join("out/src/pages/CheckoutPage.ts").exists());
    assert!(!dir.path().join("out/src/specs").exists());
}
