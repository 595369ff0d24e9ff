use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_EMAIL: &str = "fake_email@email.com";
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with one commit on `main` holding `1.txt` and `a/2.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));

    run_twig_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    twig_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.env("NO_COLOR", "1");
    for var in ["TWIG_LOG", "TWIG_AUTHOR_NAME", "TWIG_AUTHOR_EMAIL", "TWIG_AUTHOR_DATE"] {
        cmd.env_remove(var);
    }
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn with_author(mut cmd: Command) -> Command {
    cmd.envs(vec![
        ("TWIG_AUTHOR_NAME", AUTHOR_NAME),
        ("TWIG_AUTHOR_EMAIL", AUTHOR_EMAIL),
        ("TWIG_AUTHOR_DATE", AUTHOR_DATE), // %Y-%m-%d %H:%M:%S %z
    ]);
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    with_author(run_twig_command(dir, &["commit", "-m", message]))
}

pub fn twig_merge(dir: &Path, branch: &str) -> Command {
    with_author(run_twig_command(dir, &["merge", branch]))
}

/// Write a file, stage it and commit it
pub fn commit_file(dir: &Path, path: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(path), content.to_string()));
    run_twig_command(dir, &["add", path]).assert().success();
    twig_commit(dir, message).assert().success();
}

/// Short hashes printed by `log --oneline`, most recent first
pub fn oneline_hashes(dir: &Path) -> Vec<String> {
    let output = run_twig_command(dir, &["log", "--oneline"])
        .output()
        .expect("Failed to run twig log");

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Commit messages printed by `log --oneline`, most recent first
pub fn oneline_messages(dir: &Path) -> Vec<String> {
    let output = run_twig_command(dir, &["log", "--oneline"])
        .output()
        .expect("Failed to run twig log");

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| {
            // "<short> (HEAD -> main) message" or "<short> message"
            let rest = line.split_once(' ').map(|(_, rest)| rest).unwrap_or("");
            match rest.strip_prefix('(') {
                Some(decorated) => decorated
                    .split_once(") ")
                    .map(|(_, message)| message)
                    .unwrap_or(""),
                None => rest,
            }
            .to_string()
        })
        .collect()
}
