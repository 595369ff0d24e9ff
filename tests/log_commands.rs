use crate::common::command::{
    AUTHOR_EMAIL, AUTHOR_NAME, commit_file, init_repository_dir, oneline_messages,
    repository_dir, run_twig_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn log_without_commits_prints_nothing(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();

    run_twig_command(dir, &["log"]).assert().success().stdout("");
}

#[rstest]
fn log_is_most_recent_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_file(dir, "b.txt", "b", "second");
    commit_file(dir, "c.txt", "c", "third");

    assert_eq!(
        oneline_messages(dir),
        vec!["third", "second", "Initial commit"]
    );
}

#[rstest]
fn log_medium_format(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let oid = common::branch_oid(dir, "main").unwrap();

    run_twig_command(dir, &["log"])
        .assert()
        .success()
        .stdout(format!(
            "commit {oid} (HEAD -> main)\n\
             Author: {AUTHOR_NAME} <{AUTHOR_EMAIL}>\n\
             Date:   Sun Jan 1 12:00:00 2023 +0000\n\
             \n    Initial commit\n"
        ));
}

#[rstest]
fn log_oneline_decorates_tip(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_file(dir, "b.txt", "b", "second");
    let oid = common::branch_oid(dir, "main").unwrap();

    run_twig_command(dir, &["log", "--oneline"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "{} (HEAD -> main) second\n",
            &oid[..7]
        )))
        .stdout(predicate::str::ends_with(" Initial commit\n"));
}

#[rstest]
fn log_stops_at_missing_parent(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let root = common::branch_oid(dir, "main").unwrap();
    commit_file(dir, "b.txt", "b", "second");

    std::fs::remove_file(dir.join(".twig").join("objects").join(&root)).unwrap();

    assert_eq!(oneline_messages(dir), vec!["second"]);
}

#[rstest]
fn log_reports_corrupt_object(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let root = common::branch_oid(dir, "main").unwrap();
    std::fs::write(dir.join(".twig").join("objects").join(&root), b"garbage").unwrap();

    run_twig_command(dir, &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed object"));
}
