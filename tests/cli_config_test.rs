//! Black-box checks of the binary's configuration failure path.

use assert_cmd::Command;
use predicates::prelude::*;

fn scrubbed_command() -> Command {
    let mut cmd = Command::cargo_bin("kbagent").expect("binary builds");
    // Run from an empty directory so no .env file can supply values.
    let dir = tempfile::tempdir().expect("tempdir");
    cmd.current_dir(dir.keep());
    cmd.env_remove("KBC_STORAGE_API_URL")
        .env_remove("KBC_STORAGE_TOKEN")
        .env_remove("KBC_WORKSPACE_SCHEMA")
        .env_remove("OPENAI_API_KEY");
    cmd
}

#[test]
fn missing_environment_fails_fast_with_configuration_error() {
    scrubbed_command()
        .arg("--self-test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ConfigurationError"))
        .stderr(predicate::str::contains("KBC_STORAGE_TOKEN"));
}

#[test]
fn every_subcommand_validates_the_environment_first() {
    for args in [vec!["crew"], vec!["analyst", "How many rows?"], vec!["pipeline"]] {
        scrubbed_command()
            .args(&args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("ConfigurationError"));
    }
}

#[test]
fn malformed_storage_url_is_a_configuration_error() {
    scrubbed_command()
        .arg("--self-test")
        .env("KBC_STORAGE_API_URL", "not a url")
        .env("KBC_STORAGE_TOKEN", "token")
        .env("OPENAI_API_KEY", "sk-test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ConfigurationError"))
        .stderr(predicate::str::contains("KBC_STORAGE_API_URL"));
}

#[test]
fn help_lists_the_demo_subcommands() {
    Command::cargo_bin("kbagent")
        .expect("binary builds")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("crew"))
        .stdout(predicate::str::contains("analyst"))
        .stdout(predicate::str::contains("pipeline"))
        .stdout(predicate::str::contains("interactive"));
}
