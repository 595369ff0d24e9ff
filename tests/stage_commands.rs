use crate::common::command::{init_repository_dir, repository_dir, run_twig_command};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

fn index_lines(dir: &std::path::Path) -> Vec<String> {
    common::read_twig_file(dir, "index")
        .lines()
        .map(str::to_string)
        .collect()
}

#[rstest]
fn staging_a_file_appends_path_and_hash(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "hello".to_string()));

    run_twig_command(dir, &["add", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("staged a.txt"));

    // sha1("hello")
    assert_eq!(
        index_lines(dir),
        vec!["a.txt aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d".to_string()]
    );
}

#[rstest]
fn staging_unchanged_file_twice_keeps_one_entry(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "hello".to_string()));

    run_twig_command(dir, &["add", "a.txt"]).assert().success();
    run_twig_command(dir, &["add", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged a.txt"));

    assert_eq!(index_lines(dir).len(), 1);
}

#[rstest]
fn staging_modified_file_appends_new_line(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "v1".to_string()));
    run_twig_command(dir, &["add", "a.txt"]).assert().success();

    write_file(FileSpec::new(dir.join("a.txt"), "v2".to_string()));
    run_twig_command(dir, &["add", "a.txt"]).assert().success();

    let lines = index_lines(dir);
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.starts_with("a.txt ")));
}

#[rstest]
fn staging_missing_path_fails_and_leaves_index(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "hello".to_string()));
    run_twig_command(dir, &["add", "a.txt"]).assert().success();
    let before = common::read_twig_file(dir, "index");

    run_twig_command(dir, &["add", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path 'missing.txt' not found"));

    assert_eq!(common::read_twig_file(dir, "index"), before);
}

#[rstest]
fn staging_dot_respects_ignore_file(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(
        dir.join(".twigignore"),
        "# generated\n\n*.log\nbuild/\n".to_string(),
    ));
    write_file(FileSpec::new(dir.join("keep.txt"), "keep".to_string()));
    write_file(FileSpec::new(dir.join("debug.log"), "noise".to_string()));
    write_file(FileSpec::new(dir.join("build").join("out.bin"), "bin".to_string()));
    write_file(FileSpec::new(dir.join("src").join("lib.rs"), "code".to_string()));

    run_twig_command(dir, &["add", "."]).assert().success();

    let mut paths = index_lines(dir)
        .into_iter()
        .map(|line| line.rsplit_once(' ').unwrap().0.to_string())
        .collect::<Vec<_>>();
    paths.sort();
    assert_eq!(paths, vec![".twigignore", "keep.txt", "src/lib.rs"]);
}

#[rstest]
fn staging_an_ignored_file_is_skipped(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join(".twigignore"), "*.log\n".to_string()));
    write_file(FileSpec::new(dir.join("debug.log"), "noise".to_string()));

    run_twig_command(dir, &["add", "debug.log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored debug.log"));

    assert!(index_lines(dir).is_empty());
}

#[rstest]
fn staging_a_directory_stages_every_file(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    let files = write_generated_files(&dir.join("docs"), 4);
    write_file(FileSpec::new(dir.join("outside.txt"), "x".to_string()));

    run_twig_command(dir, &["add", "docs"]).assert().success();

    let lines = index_lines(dir);
    assert_eq!(lines.len(), files.len());
    assert!(lines.iter().all(|line| line.starts_with("docs/")));
}

#[rstest]
fn committed_files_can_be_restaged_after_changes(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    assert!(index_lines(dir).is_empty());

    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();

    assert_eq!(index_lines(dir).len(), 1);
}

#[rstest]
fn path_with_line_break_is_rejected(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "hello".to_string()));
    run_twig_command(dir, &["add", "a.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("x\nb"), "split".to_string()));
    let before = common::read_twig_file(dir, "index");

    run_twig_command(dir, &["add", "x\nb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("contains a line break"));

    assert_eq!(common::read_twig_file(dir, "index"), before);
}
