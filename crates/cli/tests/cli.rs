use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SCHEMA: &str = "type Query { user: User } type User { id: ID! name: String }";

fn repo() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".graphqlrc.yml"), "schema: schema.graphql\n").unwrap();
    fs::write(dir.path().join("schema.graphql"), SCHEMA).unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    dir
}

fn write(repo: &TempDir, path: &str, contents: &str) {
    fs::write(repo.path().join(path), contents).unwrap();
}

fn finder(current_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_graphql-field-finder"))
        .args(["--no-progress", "--no-color"])
        .args(args)
        .current_dir(current_dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn full_form_prints_one_line_per_usage() {
    let repo = repo();
    write(
        &repo,
        "src/user.ts",
        "const a = gql`query GetUser { user { name } }`;\n\nconst b = gql`{ user { name } }`;\n",
    );
    let repo_arg = repo.path().to_str().unwrap();

    let output = finder(repo.path(), &[repo_arg, "default", "User.name"]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        stdout(&output),
        "src/user.ts:1 GetUser\nsrc/user.ts:3 <anonymous>\n"
    );

    let output = finder(repo.path(), &["-f", "anchor", repo_arg, "default", "User.name"]);
    assert_eq!(stdout(&output), "src/user.ts#L1\nsrc/user.ts#L3\n");
}

#[test]
fn legacy_form_searches_current_directory() {
    let repo = repo();
    write(&repo, "src/user.ts", "const a = gql`query GetUser { user { id } }`;\n");

    let output = finder(repo.path(), &["User.id"]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "src/user.ts:1 GetUser\n");
}

#[test]
fn no_usages_prints_nothing_and_succeeds() {
    let repo = repo();
    write(&repo, "src/user.ts", "const a = gql`query GetUser { user { id } }`;\n");

    let output = finder(repo.path(), &["User.name"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn failures_exit_non_zero_without_stdout() {
    let repo = repo();
    write(&repo, "src/good.ts", "const a = gql`query Good { user { name } }`;\n");
    let repo_arg = repo.path().to_str().unwrap();

    let unknown_field = finder(repo.path(), &[repo_arg, "default", "User.email"]);
    assert_eq!(unknown_field.status.code(), Some(1));
    assert!(unknown_field.stdout.is_empty());
    assert!(String::from_utf8_lossy(&unknown_field.stderr).contains("User"));

    let missing_target = finder(repo.path(), &[]);
    assert_eq!(missing_target.status.code(), Some(1));

    let missing_repo = finder(repo.path(), &["/definitely/not/here", "default", "User.name"]);
    assert_eq!(missing_repo.status.code(), Some(2));
    assert!(missing_repo.stdout.is_empty());

    write(&repo, "src/broken.ts", "const b = gql`{ user { name } }`;\nconst = ;\n");
    let host_parse = finder(repo.path(), &[repo_arg, "default", "User.name"]);
    assert_eq!(host_parse.status.code(), Some(5));
    assert!(host_parse.stdout.is_empty());
}

#[test]
fn two_positional_arguments_is_a_usage_error() {
    let repo = repo();
    let output = finder(repo.path(), &["default", "User.name"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("two arguments"));
}
