/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Node` trait and the closed `Stmt`/`Expr` sums
/// - expressions: Definitions for the expression nodes and literal values
/// - statements: Definitions for the statement nodes and blocks
/// - declarations: Top-level declarations, files and packages
/// - builder: File and package assembly
/// - ranges: Source range invariants
/// - walk: Node references and the visitor
/// - parents: Parent side table
/// - printer: Source printer
pub mod ast;
pub mod builder;
pub mod declarations;
pub mod expressions;
pub mod parents;
pub mod printer;
pub mod ranges;
pub mod statements;
pub mod walk;

#[cfg(test)]
mod tests;
