use jsvtl_common::NewLineKind;
use jsvtl_emitter::{TranspileOptions, VtlNode, transform_program, transpile};
use jsvtl_estree::builders::*;
use jsvtl_estree::{
    AssignmentOperator, BinaryOperator, ExpressionStatement, LogicalOperator, Pattern, Statement,
    UnaryOperator, UpdateOperator,
};

fn options() -> TranspileOptions {
    TranspileOptions::default()
        .with_globals(["ctx", "util"])
        .with_new_line(NewLineKind::Lf)
}

fn emit(body: Vec<Statement>) -> String {
    transpile(&program(body), &options()).expect("program should transpile")
}

fn log(argument: jsvtl_estree::Expression) -> Statement {
    expr_stmt(method_call(ident("ctx"), "log", vec![argument]))
}

#[test]
fn test_shadowed_declaration_gets_suffix() {
    // const a = 0; { const a = 1; } const b = a;
    let output = emit(vec![
        const_decl("a", number(0.0)),
        block(vec![const_decl("a", number(1.0))]),
        const_decl("b", ident("a")),
    ]);
    assert_eq!(
        output,
        "#set( $a = 0 )\n#set( $a_1 = 1 )\n#set( $b = $a )"
    );
}

#[test]
fn test_suffixes_keep_counting_after_scopes_close() {
    // const a = 0; { const a = 1; } { const a = 2; }
    let output = emit(vec![
        const_decl("a", number(0.0)),
        block(vec![const_decl("a", number(1.0))]),
        block(vec![const_decl("a", number(2.0))]),
    ]);
    assert_eq!(
        output,
        "#set( $a = 0 )\n#set( $a_1 = 1 )\n#set( $a_2 = 2 )"
    );
}

#[test]
fn test_inner_block_resolves_its_own_binding() {
    // const a = 0; { const a = 1; ctx.log(a); } ctx.log(a);
    let output = emit(vec![
        const_decl("a", number(0.0)),
        block(vec![const_decl("a", number(1.0)), log(ident("a"))]),
        log(ident("a")),
    ]);
    let expected = "\
#set( $a = 0 )
#set( $a_1 = 1 )
#set( $discard = $ctx.log($a_1) )
#set( $discard = $ctx.log($a) )";
    assert_eq!(output, expected);
}

#[test]
fn test_reference_chain() {
    // const x = ctx.bar().baz;
    let output = emit(vec![const_decl(
        "x",
        member(method_call(ident("ctx"), "bar", vec![]), "baz"),
    )]);
    assert_eq!(output, "#set( $x = $ctx.bar().baz )");
}

#[test]
fn test_computed_member_becomes_get() {
    // const first = ctx.items[0];
    let output = emit(vec![const_decl(
        "first",
        index(member(ident("ctx"), "items"), number(0.0)),
    )]);
    assert_eq!(output, "#set( $first = $ctx.items.get(0) )");
}

#[test]
fn test_array_and_object_literals() {
    // const x = 1; const y = [1, x]; const z = { id: ctx.id, tags: [] };
    let output = emit(vec![
        const_decl("x", number(1.0)),
        const_decl("y", array(vec![number(1.0), ident("x")])),
        const_decl(
            "z",
            object(vec![
                ("id", member(ident("ctx"), "id")),
                ("tags", array(vec![])),
            ]),
        ),
    ]);
    let expected = "\
#set( $x = 1 )
#set( $y = [1, $x] )
#set( $z = {'id': $ctx.id, 'tags': []} )";
    assert_eq!(output, expected);
}

#[test]
fn test_literals() {
    let output = emit(vec![
        const_decl("s", string("it's")),
        const_decl("n", number(2.5)),
        const_decl("t", boolean(true)),
        const_decl("z", null()),
    ]);
    let expected = "\
#set( $s = 'it''s' )
#set( $n = 2.5 )
#set( $t = true )
#set( $z = $null )";
    assert_eq!(output, expected);
}

#[test]
fn test_expression_statement_sets_discard() {
    // util.log('hi');
    let output = emit(vec![expr_stmt(method_call(
        ident("util"),
        "log",
        vec![string("hi")],
    ))]);
    assert_eq!(output, "#set( $discard = $util.log('hi') )");
}

#[test]
fn test_user_binding_named_discard_is_not_clobbered() {
    // let discard = 1; ctx.log(discard);
    let output = emit(vec![
        let_decl("discard", Some(number(1.0))),
        log(ident("discard")),
    ]);
    assert_eq!(
        output,
        "#set( $discard_1 = 1 )\n#set( $discard = $ctx.log($discard_1) )"
    );
}

#[test]
fn test_let_without_initializer_emits_nothing() {
    // let x; x = 1;
    let output = emit(vec![let_decl("x", None), expr_stmt(assign("x", number(1.0)))]);
    assert_eq!(output, "#set( $x = 1 )");
}

#[test]
fn test_multiple_declarators() {
    // let a = 1, b;
    let output = emit(vec![declaration(
        jsvtl_estree::VariableKind::Let,
        vec![("a", Some(number(1.0))), ("b", None)],
    )]);
    assert_eq!(output, "#set( $a = 1 )");
}

#[test]
fn test_compound_assignment_and_update() {
    // let n = 1; n += 2; n *= 3; n++; --n;
    let output = emit(vec![
        let_decl("n", Some(number(1.0))),
        expr_stmt(assign_with(
            Pattern::Identifier(identifier("n")),
            AssignmentOperator::AddAssign,
            number(2.0),
        )),
        expr_stmt(assign_with(
            Pattern::Identifier(identifier("n")),
            AssignmentOperator::MulAssign,
            number(3.0),
        )),
        expr_stmt(update(UpdateOperator::Increment, ident("n"), false)),
        expr_stmt(update(UpdateOperator::Decrement, ident("n"), true)),
    ]);
    let expected = "\
#set( $n = 1 )
#set( $n = $n + 2 )
#set( $n = $n * 3 )
#set( $n = $n + 1 )
#set( $n = $n - 1 )";
    assert_eq!(output, expected);
}

#[test]
fn test_member_assignment() {
    // ctx.stash.total = 0;
    let output = emit(vec![expr_stmt(assign_member(
        member(ident("ctx"), "stash"),
        "total",
        number(0.0),
    ))]);
    assert_eq!(output, "#set( $ctx.stash.total = 0 )");
}

#[test]
fn test_precedence_parentheses() {
    // const r = (a + b) * c;
    let output = transpile(
        &program(vec![const_decl(
            "r",
            binary(
                binary(ident("a"), BinaryOperator::Add, ident("b")),
                BinaryOperator::Mul,
                ident("c"),
            ),
        )]),
        &options().with_globals(["a", "b", "c"]),
    )
    .expect("program should transpile");
    assert_eq!(output, "#set( $r = ($a + $b) * $c )");
}

#[test]
fn test_logical_and_unary() {
    // const ok = !(ctx.a && ctx.b) || -ctx.n < 0;
    let output = emit(vec![const_decl(
        "ok",
        logical(
            unary(
                UnaryOperator::Not,
                logical(
                    member(ident("ctx"), "a"),
                    LogicalOperator::And,
                    member(ident("ctx"), "b"),
                ),
            ),
            LogicalOperator::Or,
            binary(
                unary(UnaryOperator::Minus, member(ident("ctx"), "n")),
                BinaryOperator::Less,
                number(0.0),
            ),
        ),
    )]);
    assert_eq!(output, "#set( $ok = !($ctx.a && $ctx.b) || -$ctx.n < 0 )");
}

#[test]
fn test_equality_operator_is_preserved() {
    let output = emit(vec![
        const_decl("a", binary(ident("ctx"), BinaryOperator::StrictEqual, null())),
        const_decl("b", binary(ident("ctx"), BinaryOperator::NotEqual, null())),
    ]);
    assert_eq!(
        output,
        "#set( $a = $ctx === $null )\n#set( $b = $ctx != $null )"
    );
}

#[test]
fn test_if_else_if_else_chain() {
    // if (ctx.a) { x = 1 } else if (ctx.b) { x = 2 } else { x = 3 }
    let output = emit(vec![
        let_decl("x", None),
        if_stmt(
            member(ident("ctx"), "a"),
            block(vec![expr_stmt(assign("x", number(1.0)))]),
            Some(if_stmt(
                member(ident("ctx"), "b"),
                block(vec![expr_stmt(assign("x", number(2.0)))]),
                Some(block(vec![expr_stmt(assign("x", number(3.0)))])),
            )),
        ),
    ]);
    let expected = "\
#if( $ctx.a )
  #set( $x = 1 )
#elseif( $ctx.b )
  #set( $x = 2 )
#else
  #set( $x = 3 )
#end";
    assert_eq!(output, expected);
}

#[test]
fn test_else_block_wrapping_if_is_nested() {
    // if (ctx.a) {} else { if (ctx.b) {} }
    let output = emit(vec![if_stmt(
        member(ident("ctx"), "a"),
        block(vec![]),
        Some(block(vec![if_stmt(member(ident("ctx"), "b"), block(vec![]), None)])),
    )]);
    let expected = "\
#if( $ctx.a )
#else
  #if( $ctx.b )
  #end
#end";
    assert_eq!(output, expected);
}

#[test]
fn test_for_of_with_break() {
    // for (const item of ctx.items) { if (item.done) { break; } ctx.log(item); }
    let output = emit(vec![for_of(
        "item",
        member(ident("ctx"), "items"),
        block(vec![
            if_stmt(member(ident("item"), "done"), block(vec![break_stmt()]), None),
            log(ident("item")),
        ]),
    )]);
    let expected = "\
#foreach( $item in $ctx.items )
  #if( $item.done )
    #break( $foreach )
  #end
  #set( $discard = $ctx.log($item) )
#end";
    assert_eq!(output, expected);
}

#[test]
fn test_for_of_binding_is_flattened() {
    // const item = 0; for (const item of ctx.items) { ctx.log(item); } ctx.log(item);
    let output = emit(vec![
        const_decl("item", number(0.0)),
        for_of(
            "item",
            member(ident("ctx"), "items"),
            block(vec![log(ident("item"))]),
        ),
        log(ident("item")),
    ]);
    let expected = "\
#set( $item = 0 )
#foreach( $item_1 in $ctx.items )
  #set( $discard = $ctx.log($item_1) )
#end
#set( $discard = $ctx.log($item) )";
    assert_eq!(output, expected);
}

#[test]
fn test_for_of_iterable_resolves_outside_the_loop_scope() {
    // const items = ctx.items; for (const items of items) {}
    let output = emit(vec![
        const_decl("items", member(ident("ctx"), "items")),
        for_of("items", ident("items"), block(vec![])),
    ]);
    let expected = "\
#set( $items = $ctx.items )
#foreach( $items_1 in $items )
#end";
    assert_eq!(output, expected);
}

#[test]
fn test_directive_prologue_and_empty_statements_are_dropped() {
    let output = emit(vec![
        Statement::ExpressionStatement(ExpressionStatement {
            expression: string("use strict"),
            directive: Some("use strict".to_string()),
            loc: None,
        }),
        opaque(Statement::EmptyStatement),
        const_decl("a", number(1.0)),
    ]);
    assert_eq!(output, "#set( $a = 1 )");
}

#[test]
fn test_transform_program_returns_statement_list() {
    let root = transform_program(&program(vec![const_decl("a", number(1.0))]), &options())
        .expect("program should transform");
    assert_eq!(
        root,
        VtlNode::list(vec![VtlNode::set(VtlNode::var("a"), VtlNode::number(1.0))])
    );
}

#[test]
fn test_statement_lists_never_nest() {
    // let a = 1, b = 2; ; { const c = a; } switch (b) { case 2: ctx.log(a); }
    let root = transform_program(
        &program(vec![
            declaration(
                jsvtl_estree::VariableKind::Let,
                vec![("a", Some(number(1.0))), ("b", Some(number(2.0)))],
            ),
            opaque(Statement::EmptyStatement),
            block(vec![const_decl("c", ident("a"))]),
            switch(ident("b"), vec![case(Some(number(2.0)), vec![log(ident("a"))])]),
        ]),
        &options(),
    )
    .expect("program should transform");

    let VtlNode::StatementList(statements) = root else {
        panic!("root should be a statement list");
    };
    // 2 declarators, 1 block member, 3 switch temporaries, 1 case
    assert_eq!(statements.len(), 7);
    assert!(
        statements
            .iter()
            .all(|node| !matches!(node, VtlNode::StatementList(_))),
        "{statements:?}"
    );
}

#[test]
fn test_empty_program() {
    assert_eq!(emit(vec![]), "");
}

#[test]
fn test_crlf_output() {
    let output = transpile(
        &program(vec![
            const_decl("a", number(1.0)),
            const_decl("b", number(2.0)),
        ]),
        &options().with_new_line(NewLineKind::Crlf),
    )
    .expect("program should transpile");
    assert_eq!(output, "#set( $a = 1 )\r\n#set( $b = 2 )");
}
