//! Unit tests for the AST module.
//!
//! Covers node constructors and their range rules, file and package
//! assembly, traversal, the parent table and the printer.

use std::{collections::HashSet, thread};

use crate::{
    lexer::tokens::TokenKind,
    parser::parse_file,
    Pos,
};

use super::{
    ast::{Expr, Node, NodeType, Stmt, StmtType},
    builder::{FileBuilder, PackageBuilder},
    declarations::{ConstSpec, File, Func, Package, PackageSpec, VarSpec},
    expressions::{
        BasicLit, BinaryExpr, CallExpr, Ident, LitValue, Number, SelectorExpr, UnaryExpr,
    },
    parents::ParentTable,
    printer::{print_expr, print_file, print_stmt},
    statements::{AssignStmt, BlockStmt, ExprStmt},
    walk::{walk_file, NodeRef, Visitor},
};

const ALL_VARIANTS: &str = "package main

import f \"fmt\"

const c int = 1

var v = 1.5

func main() {
\tx := -(c + 2)
\tf.out = \"s\"
\tg(x)
}
";

fn number(pos: u32, text: &str, value: i64) -> Expr {
    Number::new(Pos(pos), Pos(pos).offset(text.len()), value)
        .unwrap()
        .into()
}

fn empty_file(filename: &str, package: &str) -> File {
    let source = format!("package {}\n", package);
    let pkg = PackageSpec::new(Pos(0), Pos(8), package).unwrap();
    FileBuilder::new(filename, source, pkg).finish().unwrap()
}

/// Hand-built `x := 1 + 2`, starting at offset 0.
fn define_stmt() -> AssignStmt {
    let sum = BinaryExpr::new(Pos(7), TokenKind::Plus, number(5, "1", 1), number(9, "2", 2)).unwrap();
    AssignStmt::new(Ident::new(Pos(0), "x").into(), Pos(2), TokenKind::Define, sum.into()).unwrap()
}

#[test]
fn test_define_statement_range() {
    let assign = define_stmt();

    assert_eq!(assign.pos(), Pos(0));
    assert_eq!(assign.end(), Pos(10));
    assert!(assign.is_define());

    let Expr::Binary(sum) = &assign.value else {
        panic!("expected binary expression");
    };
    assert_eq!(assign.end(), sum.y.end());
    assert_eq!(sum.pos(), Pos(5));
    assert_eq!(print_stmt(&Stmt::from(assign.clone())), "x := 1 + 2");
}

#[test]
fn test_call_target_must_be_ident() {
    let obj = Ident::new(Pos(0), "obj");
    let selector = SelectorExpr::new(obj.into(), Ident::new(Pos(4), "method")).unwrap();

    let error = CallExpr::new(selector.into(), Pos(10), vec![number(11, "1", 1)], Pos(12))
        .unwrap_err();
    assert_eq!(error.get_error_name(), "CallTargetNotIdent");
    assert_eq!(error.get_position(), Pos(0));

    let call = CallExpr::new(Ident::new(Pos(0), "f").into(), Pos(1), vec![], Pos(2)).unwrap();
    assert_eq!(call.func_name.name, "f");
    assert_eq!(call.end(), Pos(3));
}

#[test]
fn test_constructors_reject_inverted_ranges() {
    let error = Number::new(Pos(5), Pos(3), 1).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidRange");
    assert_eq!(error.get_position(), Pos(5));

    let error = BlockStmt::new(Pos(10), vec![], Pos(2)).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidRange");

    // Operands swapped: x starts after y ends.
    let error = BinaryExpr::new(Pos(3), TokenKind::Plus, number(6, "2", 2), number(0, "1", 1))
        .unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidRange");
}

#[test]
fn test_constructors_reject_bad_operators_and_literals() {
    let error = AssignStmt::new(
        Ident::new(Pos(0), "x").into(),
        Pos(2),
        TokenKind::Plus,
        number(4, "1", 1),
    )
    .unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidAssignOperator");

    let error = BinaryExpr::new(Pos(2), TokenKind::Define, number(0, "1", 1), number(4, "2", 2))
        .unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");

    let error = BasicLit::new(Pos(0), TokenKind::String, "1", LitValue::Int(1)).unwrap_err();
    assert_eq!(error.get_error_name(), "LiteralKindMismatch");
}

#[test]
fn test_basic_literal_keeps_text_and_value() {
    let lit = BasicLit::from_literal(Pos(3), TokenKind::String, "\"a\\tb\"").unwrap();

    assert_eq!(lit.value_lit, "\"a\\tb\"");
    assert_eq!(lit.value, LitValue::String("a\tb".to_string()));
    assert_eq!(lit.end(), Pos(3 + 6));

    let lit = BasicLit::from_literal(Pos(0), TokenKind::Int, "0x_FF").unwrap();
    assert_eq!(lit.value, LitValue::Int(255));
}

#[test]
fn test_block_preserves_order() {
    let first: Stmt = ExprStmt::new(Ident::new(Pos(2), "a").into()).into();
    let second: Stmt = ExprStmt::new(Ident::new(Pos(4), "b").into()).into();
    let third: Stmt = AssignStmt::new(
        Ident::new(Pos(6), "c").into(),
        Pos(8),
        TokenKind::Assignment,
        number(10, "3", 3),
    )
    .unwrap()
    .into();

    let block = BlockStmt::new(Pos(0), vec![first, second, third], Pos(12)).unwrap();

    let printed: Vec<String> = block.iter().map(print_stmt).collect();
    assert_eq!(printed, vec!["a", "b", "c = 3"]);
    let kinds: Vec<StmtType> = (&block).into_iter().map(Stmt::get_stmt_type).collect();
    assert_eq!(kinds, vec![StmtType::ExprStmt, StmtType::ExprStmt, StmtType::AssignStmt]);
    assert_eq!(block.end(), Pos(13));
}

#[test]
fn test_var_spec_end() {
    let name = Ident::new(Pos(4), "x");

    let bare = VarSpec::new(Pos(0), name.clone(), None, None).unwrap();
    assert_eq!(bare.end(), Pos(5));

    let typed = VarSpec::new(Pos(0), name.clone(), Some(Ident::new(Pos(6), "int")), None).unwrap();
    assert_eq!(typed.end(), Pos(9));

    let valued = VarSpec::new(Pos(0), name, None, Some(number(8, "10", 10))).unwrap();
    assert_eq!(valued.end(), Pos(10));
}

#[test]
fn test_file_builder_checks_containment() {
    let source = "package main\nfunc f() {}\n";
    let pkg = PackageSpec::new(Pos(0), Pos(8), "main").unwrap();

    // The body runs past the end of the source.
    let body = BlockStmt::new(Pos(22), vec![], Pos(40)).unwrap();
    let func = Func::new(Pos(13), Pos(18), "f", body).unwrap();

    let mut builder = FileBuilder::new("main.go", source, pkg);
    builder.func(func);
    let error = builder.finish().unwrap_err();

    assert_eq!(error.get_error_name(), "ChildOutsideParent");
    assert_eq!(error.get_position(), Pos(13));
}

#[test]
fn test_file_builder_checks_sibling_order() {
    let source = "package main\nconst a = 1\nconst b = 2\n";
    let pkg = PackageSpec::new(Pos(0), Pos(8), "main").unwrap();
    let a = ConstSpec::new(Pos(13), Ident::new(Pos(19), "a"), None, number(23, "1", 1)).unwrap();
    let b = ConstSpec::new(Pos(25), Ident::new(Pos(31), "b"), None, number(35, "2", 2)).unwrap();

    let mut builder = FileBuilder::new("main.go", source, pkg.clone());
    builder.constant(a.clone()).constant(b.clone());
    let file = builder.finish().unwrap();
    assert_eq!(file.consts.len(), 2);

    let mut builder = FileBuilder::new("main.go", source, pkg);
    builder.constant(b).constant(a);
    let error = builder.finish().unwrap_err();
    assert_eq!(error.get_error_name(), "SiblingsOverlap");
    assert_eq!(error.get_position(), Pos(13));
}

#[test]
fn test_package_rejects_duplicate_files() {
    let mut builder = PackageBuilder::new("util");
    builder.add_file(empty_file("a.go", "util")).unwrap();

    let error = builder.add_file(empty_file("a.go", "util")).unwrap_err();
    assert_eq!(error.get_error_name(), "DuplicateFile");

    builder.add_file(empty_file("b.go", "util")).unwrap();
    let package = builder.build();
    assert_eq!(package.len(), 2);
}

#[test]
fn test_package_len_matches_distinct_files() {
    let names = ["a.go", "b.go", "c.go", "d_test.go"];
    let package = Package::from_files("util", names.iter().map(|name| empty_file(name, "util")))
        .unwrap();

    assert_eq!(package.len(), names.len());
    for name in names {
        assert_eq!(package.file(name).unwrap().filename, name);
    }
    let keys: Vec<&String> = package.files.keys().collect();
    assert_eq!(keys, vec!["a.go", "b.go", "c.go", "d_test.go"]);
}

#[test]
fn test_package_rejects_path_filenames() {
    for filename in ["dir/a.go", "/a.go", "a\\b.go", "..", ""] {
        let error = Package::builder("util")
            .add_file(empty_file(filename, "util"))
            .map(|_| ())
            .unwrap_err();
        assert_eq!(error.get_error_name(), "InvalidFilename", "{}", filename);
    }
}

#[test]
fn test_package_rejects_other_package() {
    let mut builder = Package::builder("util");
    let error = builder.add_file(empty_file("a.go", "main")).unwrap_err();

    assert_eq!(error.get_error_name(), "PackageNameMismatch");
    assert!(builder.build().is_empty());
}

struct TypeCollector {
    seen: HashSet<NodeType>,
    order: Vec<NodeType>,
}

impl<'ast> Visitor<'ast> for TypeCollector {
    fn enter(&mut self, node: NodeRef<'ast>) -> bool {
        self.seen.insert(node.node_type());
        self.order.push(node.node_type());
        true
    }
}

#[test]
fn test_walk_visits_every_variant() {
    let file = parse_file("main.go", ALL_VARIANTS).unwrap();
    let mut collector = TypeCollector {
        seen: HashSet::new(),
        order: vec![],
    };
    walk_file(&mut collector, &file);

    let all = [
        NodeType::File,
        NodeType::PackageSpec,
        NodeType::ImportSpec,
        NodeType::ConstSpec,
        NodeType::VarSpec,
        NodeType::Func,
        NodeType::BlockStmt,
        NodeType::ExprStmt,
        NodeType::AssignStmt,
        NodeType::Ident,
        NodeType::Number,
        NodeType::BasicLit,
        NodeType::BinaryExpr,
        NodeType::UnaryExpr,
        NodeType::ParenExpr,
        NodeType::CallExpr,
        NodeType::SelectorExpr,
    ];
    for node_type in all {
        assert!(collector.seen.contains(&node_type), "{} not visited", node_type);
    }
    assert_eq!(collector.seen.len(), all.len());
    assert_eq!(&collector.order[..3], &[NodeType::File, NodeType::PackageSpec, NodeType::ImportSpec]);
}

struct SkipFuncs {
    entered: usize,
    left: usize,
}

impl<'ast> Visitor<'ast> for SkipFuncs {
    fn enter(&mut self, node: NodeRef<'ast>) -> bool {
        self.entered += 1;
        node.node_type() != NodeType::Func
    }

    fn leave(&mut self, _node: NodeRef<'ast>) {
        self.left += 1;
    }
}

#[test]
fn test_walk_can_skip_children() {
    let file = parse_file("main.go", ALL_VARIANTS).unwrap();
    let mut visitor = SkipFuncs { entered: 0, left: 0 };
    walk_file(&mut visitor, &file);

    // File, package, import (+ alias, path), const (+ name, type, value),
    // var (+ name, value), func.
    assert_eq!(visitor.entered, 13);
    assert_eq!(visitor.left, visitor.entered);
}

#[test]
fn test_children_are_ordered_and_contained() {
    let file = parse_file("main.go", ALL_VARIANTS).unwrap();

    fn check(node: NodeRef<'_>) {
        let children = node.children();
        for child in &children {
            assert!(node.span().contains(&child.span()), "{} escapes {}", child.node_type(), node.node_type());
            check(*child);
        }
        for pair in children.windows(2) {
            assert!(pair[0].end() <= pair[1].pos());
        }
    }

    check(NodeRef::File(&file));
}

#[test]
fn test_file_children_follow_source_order() {
    let source = "package p\nfunc f() {}\nconst a = 1\nvar b = 2\nfunc g() {}\n";
    let file = parse_file("p.go", source).unwrap();

    let children: Vec<(NodeType, Pos)> = NodeRef::File(&file)
        .children()
        .iter()
        .map(|child| (child.node_type(), child.pos()))
        .collect();
    assert_eq!(
        children,
        vec![
            (NodeType::PackageSpec, Pos(0)),
            (NodeType::Func, Pos(10)),
            (NodeType::ConstSpec, Pos(22)),
            (NodeType::VarSpec, Pos(34)),
            (NodeType::Func, Pos(44)),
        ]
    );
}

#[test]
fn test_parent_table() {
    let file = parse_file("main.go", ALL_VARIANTS).unwrap();
    let parents = ParentTable::build(&file);

    let Stmt::Assign(assign) = &file.funcs[0].body.list[0] else {
        panic!("expected assignment");
    };
    let Expr::Unary(negation) = &assign.value else {
        panic!("expected unary expression");
    };

    let parent = parents.parent(NodeRef::Expr(&negation.x)).unwrap();
    assert_eq!(parent.node_type(), NodeType::UnaryExpr);

    let chain: Vec<NodeType> = parents
        .ancestors(NodeRef::Expr(&negation.x))
        .iter()
        .map(|node| node.node_type())
        .collect();
    assert_eq!(
        chain,
        vec![
            NodeType::UnaryExpr,
            NodeType::AssignStmt,
            NodeType::BlockStmt,
            NodeType::Func,
            NodeType::File,
        ]
    );

    assert!(parents.parent(NodeRef::File(&file)).is_none());

    let mut collector = TypeCollector {
        seen: HashSet::new(),
        order: vec![],
    };
    walk_file(&mut collector, &file);
    assert_eq!(parents.len(), collector.order.len() - 1);
}

#[test]
fn test_print_file() {
    let file = parse_file("main.go", ALL_VARIANTS).unwrap();

    assert_eq!(print_file(&file), ALL_VARIANTS);
}

#[test]
fn test_print_normalizes_layout() {
    let source = "package main\nfunc main() { a = 0x10; b(1,2) }\nconst k = 1\n";
    let file = parse_file("main.go", source).unwrap();

    assert_eq!(
        print_file(&file),
        "package main\n\nconst k = 1\n\nfunc main() {\n\ta = 16\n\tb(1, 2)\n}\n"
    );

    let Stmt::Expr(call) = &file.funcs[0].body.list[1] else {
        panic!("expected call statement");
    };
    assert_eq!(print_expr(&call.x), "b(1, 2)");
}

fn ident(name: &str) -> Expr {
    Ident::new(Pos::null(), name).into()
}

fn binary(op: TokenKind, x: Expr, y: Expr) -> Expr {
    BinaryExpr::new(Pos::null(), op, x, y).unwrap().into()
}

#[test]
fn test_print_keeps_grouping_of_built_trees() {
    let sum = binary(TokenKind::Plus, ident("a"), ident("b"));

    let product = binary(TokenKind::Star, sum.clone(), ident("c"));
    assert_eq!(print_expr(&product), "(a + b) * c");

    // Left associative: only a right operand of equal power needs parens.
    let left = binary(TokenKind::Dash, sum.clone(), ident("c"));
    assert_eq!(print_expr(&left), "a + b - c");
    let right = binary(TokenKind::Dash, ident("c"), sum.clone());
    assert_eq!(print_expr(&right), "c - (a + b)");

    let either = binary(
        TokenKind::And,
        binary(TokenKind::Or, ident("p"), ident("q")),
        binary(TokenKind::Less, ident("x"), ident("y")),
    );
    assert_eq!(print_expr(&either), "(p || q) && x < y");

    let negated = UnaryExpr::new(Pos::null(), TokenKind::Dash, sum.clone()).unwrap();
    assert_eq!(print_expr(&negated.into()), "-(a + b)");

    let field = SelectorExpr::new(sum, Ident::new(Pos::null(), "f")).unwrap();
    assert_eq!(print_expr(&field.into()), "(a + b).f");
}

#[test]
fn test_printed_built_tree_reparses_to_same_shape() {
    let product = binary(
        TokenKind::Star,
        binary(TokenKind::Plus, ident("a"), ident("b")),
        ident("c"),
    );
    let source = format!("package p\nconst k = {}\n", print_expr(&product));

    let file = parse_file("p.go", &source).unwrap();
    let Expr::Binary(top) = &file.consts[0].value else {
        panic!("expected binary expression");
    };
    assert_eq!(top.op, TokenKind::Star);
    assert_eq!(top.x.node_type(), NodeType::ParenExpr);
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_trees_are_shareable_across_threads() {
    assert_send_sync::<File>();
    assert_send_sync::<Package>();
    assert_send_sync::<Expr>();

    let file = parse_file("main.go", ALL_VARIANTS).unwrap();
    let expected = print_file(&file);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| print_file(&file)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
