use super::args::CliArgs;
use super::config::ResolvedOptions;
use super::driver::{Input, run, run_with_options};
use clap::Parser;
use jsvtl_common::NewLineKind;
use jsvtl_emitter::TranspileOptions;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `const greeting = ctx.name;`
const GREETING: &str = r#"{
  "type": "Program",
  "sourceType": "script",
  "body": [{
    "type": "VariableDeclaration",
    "kind": "const",
    "loc": { "start": { "line": 1, "column": 0 }, "end": { "line": 1, "column": 26 } },
    "declarations": [{
      "type": "VariableDeclarator",
      "id": { "type": "Identifier", "name": "greeting" },
      "init": {
        "type": "MemberExpression",
        "computed": false,
        "object": { "type": "Identifier", "name": "ctx" },
        "property": { "type": "Identifier", "name": "name" }
      }
    }]
  }]
}"#;

/// `while (true) {}` on line 3.
const WHILE_LOOP: &str = r#"{
  "type": "Program",
  "body": [{
    "type": "WhileStatement",
    "loc": { "start": { "line": 3, "column": 2 }, "end": { "line": 3, "column": 17 } },
    "test": { "type": "Literal", "value": true, "raw": "true" },
    "body": { "type": "BlockStatement", "body": [] }
  }]
}"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn args(argv: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("jsvtl").chain(argv.iter().copied()))
        .expect("args should parse")
}

fn options(globals: &[&str]) -> ResolvedOptions {
    ResolvedOptions {
        transpile: TranspileOptions::default()
            .with_globals(globals.iter().copied())
            .with_new_line(NewLineKind::Lf),
        out_dir: None,
    }
}

#[test]
fn transpiles_file_to_template() {
    let dir = TempDir::new().expect("temp dir");
    write_file(dir.path(), "greeting.json", GREETING);

    let result = run(
        &args(&["-g", "ctx", "--new-line", "lf", "greeting.json"]),
        dir.path(),
        &mut Cursor::new(""),
    )
    .expect("run should succeed");

    assert!(result.succeeded());
    assert_eq!(result.templates.len(), 1);
    assert_eq!(result.templates[0].text, "#set( $greeting = $ctx.name )");
}

#[test]
fn reads_stdin_when_no_files_given() {
    let result = run_with_options(
        &[Input::Stdin],
        &options(&["ctx"]),
        &mut Cursor::new(GREETING),
    )
    .expect("run should succeed");

    assert_eq!(result.templates.len(), 1);
    assert_eq!(result.templates[0].input, "<stdin>");
    assert_eq!(result.templates[0].text, "#set( $greeting = $ctx.name )");
}

#[test]
fn failure_does_not_stop_later_inputs() {
    let dir = TempDir::new().expect("temp dir");
    let bad = write_file(dir.path(), "loop.json", WHILE_LOOP);
    let good = write_file(dir.path(), "greeting.json", GREETING);

    let result = run_with_options(
        &[Input::File(bad.clone()), Input::File(good)],
        &options(&["ctx"]),
        &mut Cursor::new(""),
    )
    .expect("run should succeed");

    assert!(!result.succeeded());
    assert_eq!(result.input_count(), 2);
    assert_eq!(result.templates.len(), 1);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].file, bad.display().to_string());
    assert_eq!(
        result.failures[0].message,
        "Line 3, column 3: while loops are not supported"
    );
}

#[test]
fn unresolved_global_is_reported() {
    let result = run_with_options(&[Input::Stdin], &options(&[]), &mut Cursor::new(GREETING))
        .expect("run should succeed");
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].message, "'ctx' is not defined");
}

#[test]
fn malformed_json_is_reported() {
    let result = run_with_options(
        &[Input::Stdin],
        &options(&["ctx"]),
        &mut Cursor::new("{ not json"),
    )
    .expect("run should succeed");
    assert_eq!(result.failures.len(), 1);
    assert!(
        result.failures[0].message.starts_with("invalid ESTree input: "),
        "{}",
        result.failures[0].message
    );
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let result = run_with_options(
        &[Input::File(dir.path().join("absent.json"))],
        &options(&[]),
        &mut Cursor::new(""),
    )
    .expect("run should succeed");
    assert_eq!(result.failures.len(), 1);
    assert!(
        result.failures[0].message.starts_with("failed to read "),
        "{}",
        result.failures[0].message
    );
}

#[test]
fn writes_templates_to_out_dir() {
    let dir = TempDir::new().expect("temp dir");
    write_file(dir.path(), "greeting.json", GREETING);

    let result = run(
        &args(&[
            "-g",
            "ctx",
            "--new-line",
            "lf",
            "--out-dir",
            "dist",
            "greeting.json",
        ]),
        dir.path(),
        &mut Cursor::new(""),
    )
    .expect("run should succeed");

    let expected = dir.path().join("dist").join("greeting.vtl");
    assert!(result.templates.is_empty());
    assert_eq!(result.written, vec![expected.clone()]);
    let written = std::fs::read_to_string(&expected).expect("template should be written");
    assert_eq!(written, "#set( $greeting = $ctx.name )");
}

#[test]
fn config_file_supplies_globals() {
    let dir = TempDir::new().expect("temp dir");
    write_file(dir.path(), "jsvtl.json", r#"{ "globals": ["ctx"], "newLine": "lf" }"#);
    write_file(dir.path(), "greeting.json", GREETING);

    let result = run(&args(&["greeting.json"]), dir.path(), &mut Cursor::new(""))
        .expect("run should succeed");
    assert!(result.succeeded(), "{:?}", result.failures);
    assert_eq!(result.templates[0].text, "#set( $greeting = $ctx.name )");
}

#[test]
fn broken_config_aborts_the_run() {
    let dir = TempDir::new().expect("temp dir");
    write_file(dir.path(), "jsvtl.json", "{ \"globals\": ");

    let err = run(&args(&[]), dir.path(), &mut Cursor::new(GREETING))
        .expect_err("a broken config is fatal");
    assert!(format!("{err:#}").contains("jsvtl config"), "{err:#}");
}

#[test]
fn output_file_names() {
    assert_eq!(
        Input::File(PathBuf::from("src/handler.json")).output_file_name(),
        PathBuf::from("handler.vtl")
    );
    assert_eq!(Input::Stdin.output_file_name(), PathBuf::from("stdin.vtl"));
}

#[test]
fn stdout_templates_use_the_rendered_line_ending() {
    let dir = TempDir::new().expect("temp dir");
    write_file(dir.path(), "a.json", GREETING);
    write_file(dir.path(), "b.json", GREETING);

    let result = run(
        &args(&["-g", "ctx", "--new-line", "crlf", "a.json", "b.json"]),
        dir.path(),
        &mut Cursor::new(""),
    )
    .expect("run should succeed");

    let mut out = Vec::new();
    result.write_templates(&mut out).expect("write to buffer");
    assert_eq!(
        String::from_utf8(out).expect("utf-8 output"),
        "#set( $greeting = $ctx.name )\r\n#set( $greeting = $ctx.name )\r\n"
    );
}

#[test]
fn shared_stem_in_out_dir_is_reported_not_overwritten() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::create_dir(dir.path().join("one")).expect("create dir");
    std::fs::create_dir(dir.path().join("two")).expect("create dir");
    write_file(&dir.path().join("one"), "greeting.json", GREETING);
    write_file(
        &dir.path().join("two"),
        "greeting.json",
        &GREETING.replace("greeting", "welcome"),
    );

    let result = run(
        &args(&[
            "-g",
            "ctx",
            "--new-line",
            "lf",
            "--out-dir",
            "dist",
            "one/greeting.json",
            "two/greeting.json",
        ]),
        dir.path(),
        &mut Cursor::new(""),
    )
    .expect("run should succeed");

    let output = dir.path().join("dist").join("greeting.vtl");
    assert_eq!(result.written, vec![output.clone()]);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(
        result.failures[0].file,
        dir.path().join("two/greeting.json").display().to_string()
    );
    assert!(
        result.failures[0].message.contains("was already written for"),
        "{}",
        result.failures[0].message
    );
    let written = std::fs::read_to_string(&output).expect("template should be written");
    assert_eq!(written, "#set( $greeting = $ctx.name )");
}
