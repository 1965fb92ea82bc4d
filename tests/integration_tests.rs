//! End-to-end tests: ESTree JSON fixtures in, template text out.
//!
//! Each `tests/fixtures/<name>.json` is parser output for a short program
//! (the source is reproduced in a comment on each test); where a
//! `<name>.vtl` exists it holds the expected template.

use jsvtl::{Error, NewLineKind, SwitchEquality, TranspileErrorKind, TranspileOptions, transpile_json};

fn options() -> TranspileOptions {
    TranspileOptions::default()
        .with_globals(["ctx"])
        .with_new_line(NewLineKind::Lf)
}

fn expected(template: &str) -> &str {
    template.trim_end_matches('\n')
}

#[test]
fn handler_with_loop_and_compound_assignment() {
    // const items = ctx.args.items;
    // let total = 0;
    // for (const item of items) {
    //   if (item.skip) {
    //     break;
    //   }
    //   total += item.price * item.quantity;
    // }
    // ctx.stash.put('total', total);
    let output = transpile_json(include_str!("fixtures/handler.json"), &options())
        .expect("handler should transpile");
    assert_eq!(output, expected(include_str!("fixtures/handler.vtl")));
}

#[test]
fn route_with_switch_fallthrough() {
    // "use strict";
    // const kind = ctx.args.kind;
    // const response = { status: 200, tags: [] };
    // switch (kind) {
    //   case 'create':
    //   case 'update':
    //     response.status = 201;
    //     break;
    //   case 'delete':
    //     response.status = 204;
    //     break;
    //   default:
    //     response.status = 400;
    // }
    // ctx.render(response);
    let output = transpile_json(include_str!("fixtures/route.json"), &options())
        .expect("route should transpile");
    assert_eq!(output, expected(include_str!("fixtures/route.vtl")));
}

#[test]
fn route_with_strict_switch_equality() {
    let output = transpile_json(
        include_str!("fixtures/route.json"),
        &options().with_switch_equality(SwitchEquality::Strict),
    )
    .expect("route should transpile");
    assert!(output.contains("#if( $fallthrough || $discriminant === 'create' )"));
    assert!(!output.contains(" == "));
}

#[test]
fn shadowed_names_are_flattened() {
    // const a = 0;
    // {
    //   const a = 1;
    // }
    // const b = a;
    let output = transpile_json(include_str!("fixtures/shadowing.json"), &options())
        .expect("shadowing should transpile");
    assert_eq!(output, expected(include_str!("fixtures/shadowing.vtl")));
}

#[test]
fn crlf_output_uses_crlf_between_lines() {
    let output = transpile_json(
        include_str!("fixtures/shadowing.json"),
        &options().with_new_line(NewLineKind::Crlf),
    )
    .expect("shadowing should transpile");
    assert_eq!(output, "#set( $a = 0 )\r\n#set( $a_1 = 1 )\r\n#set( $b = $a )");
}

#[test]
fn function_declaration_is_rejected_with_location() {
    // const x = 1;
    // function helper() {}
    let err = transpile_json(include_str!("fixtures/unsupported.json"), &options())
        .expect_err("functions have no template equivalent");
    let Error::Transpile(err) = err else {
        panic!("expected a transpile error, got {err}");
    };
    assert_eq!(err.kind, TranspileErrorKind::UnsupportedConstruct);
    assert_eq!(
        err.to_string(),
        "Line 2, column 1: function declarations are not supported"
    );
}

#[test]
fn undefined_name_is_rejected_with_location() {
    // const total = price * 2;
    let err = transpile_json(include_str!("fixtures/undefined.json"), &options())
        .expect_err("price is not declared");
    assert_eq!(err.to_string(), "Line 1, column 15: 'price' is not defined");
}

#[test]
fn globals_make_names_resolvable() {
    let output = transpile_json(
        include_str!("fixtures/undefined.json"),
        &options().with_globals(["price"]),
    )
    .expect("price is a global");
    assert_eq!(output, "#set( $total = $price * 2 )");
}

#[test]
fn non_program_root_is_a_parse_error() {
    let err = transpile_json(r#"{ "type": "BlockStatement", "body": [] }"#, &options())
        .expect_err("root must be a Program");
    assert!(matches!(err, Error::Parse(_)));
    assert!(err.to_string().starts_with("invalid ESTree input: "), "{err}");
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = transpile_json("{", &options()).expect_err("truncated input");
    assert!(matches!(err, Error::Parse(_)));
}
