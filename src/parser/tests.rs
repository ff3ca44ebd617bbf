//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Package clauses and imports
//! - Constant, variable and function declarations
//! - Expressions and operator precedence
//! - Assignment statements
//! - Error cases

use crate::{
    ast::{
        ast::{Expr, Node, Stmt},
        expressions::LitValue,
        printer::print_expr,
    },
    lexer::tokens::TokenKind,
    Pos,
};

use super::parser::{parse_file, parse_package, MAX_NESTING_DEPTH};

fn parse_body(body: &str) -> Vec<Stmt> {
    let source = format!("package main\n\nfunc main() {{\n{}\n}}\n", body);
    let file = parse_file("main.go", &source).unwrap();
    file.funcs[0].body.list.clone()
}

fn parse_single_expr(expr: &str) -> Expr {
    match parse_body(expr).remove(0) {
        Stmt::Expr(stmt) => stmt.x,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_package_clause() {
    let file = parse_file("main.go", "package main\n").unwrap();

    assert_eq!(file.filename, "main.go");
    assert_eq!(file.pkg.name, "main");
    assert_eq!(file.pkg.pkg_pos, Pos(0));
    assert_eq!(file.pkg.name_pos, Pos(8));
    assert!(file.imports.is_empty());
    assert!(file.funcs.is_empty());
}

#[test]
fn test_parse_imports() {
    let source = "package main\nimport \"fmt\"\nimport str `strings`\n";
    let file = parse_file("main.go", source).unwrap();

    assert_eq!(file.imports.len(), 2);
    assert!(file.imports[0].name.is_none());
    assert_eq!(file.imports[0].path_value(), "fmt");
    assert_eq!(file.imports[0].path.value_lit, "\"fmt\"");
    assert_eq!(file.imports[1].name.as_ref().unwrap().name, "str");
    assert_eq!(file.imports[1].path_value(), "strings");
}

#[test]
fn test_parse_const_and_var() {
    let source = "package main\nconst a = 1\nconst b int = 2\nvar x int\nvar y = \"s\"\nvar z float = 1.5\n";
    let file = parse_file("main.go", source).unwrap();

    assert_eq!(file.consts.len(), 2);
    assert!(file.consts[0].ty.is_none());
    assert_eq!(file.consts[1].ty.as_ref().unwrap().name, "int");

    assert_eq!(file.globals.len(), 3);
    assert!(file.globals[0].value.is_none());
    assert_eq!(file.globals[0].end(), file.globals[0].ty.as_ref().unwrap().end());
    match &file.globals[1].value {
        Some(Expr::BasicLit(lit)) => assert_eq!(lit.value, LitValue::String("s".to_string())),
        other => panic!("unexpected value {:?}", other),
    }
    match &file.globals[2].value {
        Some(Expr::BasicLit(lit)) => assert_eq!(lit.value, LitValue::Float(1.5)),
        other => panic!("unexpected value {:?}", other),
    }
}

#[test]
fn test_parse_function_declaration() {
    let source = "package main\n\nfunc main() {\n\tx := 1\n\tprintln(x)\n}\n\nfunc empty() {}\n";
    let file = parse_file("main.go", source).unwrap();

    assert_eq!(file.funcs.len(), 2);
    let main = file.find_func("main").unwrap();
    assert_eq!(main.body.len(), 2);
    assert_eq!(main.pos(), Pos(14));
    assert_eq!(main.end(), Pos(source.find("}\n\n").unwrap() as u32 + 1));
    assert!(file.find_func("empty").unwrap().body.is_empty());
}

#[test]
fn test_parse_define_scenario() {
    let source = "package main\nfunc main() {\n\tx := 1 + 2\n}\n";
    let file = parse_file("main.go", source).unwrap();

    let Stmt::Assign(assign) = &file.funcs[0].body.list[0] else {
        panic!("expected assignment");
    };
    let Expr::Binary(sum) = &assign.value else {
        panic!("expected binary expression");
    };

    assert!(assign.is_define());
    assert_eq!(assign.pos(), assign.target.pos());
    assert_eq!(assign.target.as_ident().unwrap().name, "x");
    assert_eq!(assign.end(), sum.y.end());
    assert_eq!(sum.op, TokenKind::Plus);
    assert!(matches!(*sum.y, Expr::Number(ref number) if number.value == 2));
}

#[test]
fn test_block_preserves_statement_order() {
    let stmts = parse_body("a = 1\nb = 2; c = 3\nd()");
    let targets: Vec<String> = stmts
        .iter()
        .map(|stmt| match stmt {
            Stmt::Assign(assign) => print_expr(&assign.target),
            Stmt::Expr(expr) => print_expr(&expr.x),
        })
        .collect();

    assert_eq!(targets, vec!["a", "b", "c", "d()"]);
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("1 + 2 * 3", "1 + 2 * 3", TokenKind::Plus),
        ("a || b && c", "a || b && c", TokenKind::Or),
        ("a == b + 1", "a == b + 1", TokenKind::Equals),
        ("a - b - c", "a - b - c", TokenKind::Dash),
    ];

    for (source, printed, root_op) in cases {
        let expr = parse_single_expr(source);
        assert_eq!(print_expr(&expr), printed);
        match expr {
            Expr::Binary(binary) => assert_eq!(binary.op, root_op),
            other => panic!("expected binary expression for {}, got {:?}", source, other),
        }
    }
}

#[test]
fn test_left_associativity() {
    let Expr::Binary(outer) = parse_single_expr("a - b - c") else {
        panic!("expected binary expression");
    };

    assert!(matches!(*outer.x, Expr::Binary(_)));
    assert!(matches!(*outer.y, Expr::Ident(ref ident) if ident.name == "c"));
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    let Expr::Binary(binary) = parse_single_expr("-a * b") else {
        panic!("expected binary expression");
    };
    assert_eq!(binary.op, TokenKind::Star);
    assert!(matches!(*binary.x, Expr::Unary(ref unary) if unary.op == TokenKind::Dash));

    let Expr::Unary(unary) = parse_single_expr("!f(x)") else {
        panic!("expected unary expression");
    };
    assert_eq!(unary.op, TokenKind::Not);
    assert!(matches!(*unary.x, Expr::Call(_)));
}

#[test]
fn test_parens_are_kept() {
    let expr = parse_single_expr("(1 + 2) * 3");

    assert_eq!(print_expr(&expr), "(1 + 2) * 3");
    let Expr::Binary(binary) = expr else {
        panic!("expected binary expression");
    };
    let Expr::Paren(paren) = *binary.x else {
        panic!("expected parenthesized expression");
    };
    assert_eq!(paren.end().0 - paren.pos().0, 7);
}

#[test]
fn test_call_and_selector() {
    let expr = parse_single_expr("f(a.b, 1, \"s\",)");

    let Expr::Call(call) = expr else {
        panic!("expected call");
    };
    assert_eq!(call.func_name.name, "f");
    assert_eq!(call.args.len(), 3);
    assert!(matches!(call.args[0], Expr::Selector(ref sel) if sel.sel.name == "b"));
    assert_eq!(call.end(), call.rparen.offset(1));
}

#[test]
fn test_selector_call_is_rejected() {
    let source = "package main\nfunc main() {\n\tobj.method(1)\n}\n";
    let error = parse_file("main.go", source).unwrap_err();

    assert_eq!(error.get_error_name(), "CallTargetNotIdent");
    assert_eq!(error.get_position(), Pos(source.find("obj").unwrap() as u32));
}

#[test]
fn test_invalid_assign_target() {
    let source = "package main\nfunc main() {\n\tf() = 1\n}\n";
    let error = parse_file("main.go", source).unwrap_err();

    assert_eq!(error.get_error_name(), "InvalidAssignTarget");
}

#[test]
fn test_missing_package_clause() {
    let error = parse_file("main.go", "func main() {}\n").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position(), Pos(0));
}

#[test]
fn test_var_needs_type_or_value() {
    let error = parse_file("main.go", "package main\nvar x\n").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position(), Pos(18));
}

#[test]
fn test_const_needs_value() {
    let error = parse_file("main.go", "package main\nconst x int\n").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_import_after_declaration() {
    let source = "package main\nvar x = 1\nimport \"fmt\"\n";
    let error = parse_file("main.go", source).unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position(), Pos(23));
}

#[test]
fn test_unclosed_block() {
    let error = parse_file("main.go", "package main\nfunc main() {\n\tx := 1\n").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

fn nested_parens(depth: usize) -> String {
    format!(
        "package p\nfunc f() {{ x = {}1{} }}\n",
        "(".repeat(depth),
        ")".repeat(depth)
    )
}

#[test]
fn test_deep_nesting_is_an_error() {
    // The assignment value is one level, each paren adds another.
    let file = parse_file("p.go", &nested_parens(MAX_NESTING_DEPTH - 1)).unwrap();
    assert_eq!(file.funcs[0].body.len(), 1);

    let error = parse_file("p.go", &nested_parens(MAX_NESTING_DEPTH)).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");
    // "package p\nfunc f() { x = " is 25 bytes; the error sits on the `1`.
    assert_eq!(error.get_position(), Pos(25 + MAX_NESTING_DEPTH as u32));

    let error = parse_file("p.go", &nested_parens(100_000)).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");
}

#[test]
fn test_deep_unary_chain_is_an_error() {
    let source = format!("package p\nconst k = {}1\n", "-".repeat(10_000));
    let error = parse_file("p.go", &source).unwrap_err();

    assert_eq!(error.get_error_name(), "NestingTooDeep");
}

#[test]
fn test_long_operator_chain_counts_as_nesting() {
    let chain = |length: usize| format!("package p\nconst k = 1{}\n", " + 1".repeat(length));

    let file = parse_file("p.go", &chain(100)).unwrap();
    assert_eq!(file.consts.len(), 1);

    let error = parse_file("p.go", &chain(5_000)).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");
}

#[test]
fn test_bad_literal_reports_position() {
    let source = "package main\nvar x = \"a\\qb\"\n";
    let error = parse_file("main.go", source).unwrap_err();

    assert_eq!(error.get_error_name(), "InvalidStringLiteral");
    assert_eq!(error.get_position(), Pos(21));
}

#[test]
fn test_parse_package_files() {
    let package = parse_package(
        "util",
        &[
            ("a.go", "package util\nvar a = 1\n"),
            ("b.go", "package util\nfunc b() {}\n"),
        ],
    )
    .unwrap();

    assert_eq!(package.name, "util");
    assert_eq!(package.len(), 2);
    assert_eq!(package.file("a.go").unwrap().globals.len(), 1);
    assert!(package.file("b.go").unwrap().find_func("b").is_some());
}

#[test]
fn test_parse_package_rejects_duplicates_and_mismatches() {
    let error = parse_package(
        "util",
        &[("a.go", "package util\n"), ("a.go", "package util\n")],
    )
    .unwrap_err();
    assert_eq!(error.get_error_name(), "DuplicateFile");

    let error = parse_package("util", &[("a.go", "package other\n")]).unwrap_err();
    assert_eq!(error.get_error_name(), "PackageNameMismatch");
}
