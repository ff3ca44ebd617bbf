//! Source printer.
//!
//! Re-prints a [`File`] as µGo source. Explicit parentheses are kept as
//! written, and operands of hand-built trees that would regroup under the
//! parser's precedence rules get parentheses added. Layout is normalized:
//! one declaration per line, tab indentation, single spaces around binary
//! operators. Declarations are emitted grouped by kind: imports, constants,
//! globals, functions.

use std::fmt::Write;

use crate::parser::lookups::{operator_binding_power, BindingPower};

use super::{
    ast::{Expr, Stmt},
    declarations::{ConstSpec, File, Func, ImportSpec, VarSpec},
    statements::BlockStmt,
};

pub fn print_file(file: &File) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_file(&mut out, file);
    out
}

pub fn print_expr(expr: &Expr) -> String {
    let mut out = String::new();
    let _ = write_expr(&mut out, expr);
    out
}

pub fn print_stmt(stmt: &Stmt) -> String {
    let mut out = String::new();
    let _ = write_stmt(&mut out, stmt);
    out
}

fn write_file(out: &mut String, file: &File) -> std::fmt::Result {
    writeln!(out, "package {}", file.pkg.name)?;

    if !file.imports.is_empty() {
        writeln!(out)?;
        for spec in &file.imports {
            write_import(out, spec)?;
        }
    }

    if !file.consts.is_empty() {
        writeln!(out)?;
        for spec in &file.consts {
            write_const(out, spec)?;
        }
    }

    if !file.globals.is_empty() {
        writeln!(out)?;
        for spec in &file.globals {
            write_var(out, spec)?;
        }
    }

    for func in &file.funcs {
        writeln!(out)?;
        write_func(out, func)?;
    }

    Ok(())
}

fn write_import(out: &mut String, spec: &ImportSpec) -> std::fmt::Result {
    match &spec.name {
        Some(name) => writeln!(out, "import {} {}", name.name, spec.path.value_lit),
        None => writeln!(out, "import {}", spec.path.value_lit),
    }
}

fn write_const(out: &mut String, spec: &ConstSpec) -> std::fmt::Result {
    write!(out, "const {}", spec.name.name)?;
    if let Some(ty) = &spec.ty {
        write!(out, " {}", ty.name)?;
    }
    write!(out, " = ")?;
    write_expr(out, &spec.value)?;
    writeln!(out)
}

fn write_var(out: &mut String, spec: &VarSpec) -> std::fmt::Result {
    write!(out, "var {}", spec.name.name)?;
    if let Some(ty) = &spec.ty {
        write!(out, " {}", ty.name)?;
    }
    if let Some(value) = &spec.value {
        write!(out, " = ")?;
        write_expr(out, value)?;
    }
    writeln!(out)
}

fn write_func(out: &mut String, func: &Func) -> std::fmt::Result {
    write!(out, "func {}() ", func.name)?;
    write_block(out, &func.body)?;
    writeln!(out)
}

fn write_block(out: &mut String, block: &BlockStmt) -> std::fmt::Result {
    if block.is_empty() {
        return write!(out, "{{}}");
    }

    writeln!(out, "{{")?;
    for stmt in block {
        write!(out, "\t")?;
        write_stmt(out, stmt)?;
        writeln!(out)?;
    }
    write!(out, "}}")
}

fn write_stmt(out: &mut String, stmt: &Stmt) -> std::fmt::Result {
    match stmt {
        Stmt::Expr(stmt) => write_expr(out, &stmt.x),
        Stmt::Assign(stmt) => {
            write_expr(out, &stmt.target)?;
            write!(out, " {} ", stmt.op)?;
            write_expr(out, &stmt.value)
        }
    }
}

fn write_expr(out: &mut String, expr: &Expr) -> std::fmt::Result {
    match expr {
        Expr::Ident(ident) => write!(out, "{}", ident.name),
        Expr::Number(number) => write!(out, "{}", number.value),
        Expr::BasicLit(lit) => write!(out, "{}", lit.value_lit),
        Expr::Binary(expr) => {
            // Binary operators are left associative.
            let bp = operator_binding_power(expr.op);
            write_operand(out, &expr.x, precedence(&expr.x) < bp)?;
            write!(out, " {} ", expr.op)?;
            write_operand(out, &expr.y, precedence(&expr.y) <= bp)
        }
        Expr::Unary(expr) => {
            write!(out, "{}", expr.op)?;
            write_operand(out, &expr.x, precedence(&expr.x) < BindingPower::Unary)
        }
        Expr::Paren(expr) => {
            write!(out, "(")?;
            write_expr(out, &expr.x)?;
            write!(out, ")")
        }
        Expr::Call(expr) => {
            write!(out, "{}(", expr.func_name.name)?;
            for (index, arg) in expr.args.iter().enumerate() {
                if index > 0 {
                    write!(out, ", ")?;
                }
                write_expr(out, arg)?;
            }
            write!(out, ")")
        }
        Expr::Selector(expr) => {
            write_operand(out, &expr.x, precedence(&expr.x) < BindingPower::Call)?;
            write!(out, ".{}", expr.sel.name)
        }
    }
}

fn write_operand(out: &mut String, expr: &Expr, parenthesize: bool) -> std::fmt::Result {
    if parenthesize {
        write!(out, "(")?;
        write_expr(out, expr)?;
        write!(out, ")")
    } else {
        write_expr(out, expr)
    }
}

/// How tightly the printed form of `expr` holds together.
fn precedence(expr: &Expr) -> BindingPower {
    match expr {
        Expr::Binary(expr) => operator_binding_power(expr.op),
        Expr::Unary(_) => BindingPower::Unary,
        // Printed with a leading `-`.
        Expr::Number(number) if number.value < 0 => BindingPower::Unary,
        Expr::Call(_) => BindingPower::Call,
        Expr::Selector(_) => BindingPower::Member,
        Expr::Ident(_) | Expr::Number(_) | Expr::BasicLit(_) | Expr::Paren(_) => {
            BindingPower::Primary
        }
    }
}
