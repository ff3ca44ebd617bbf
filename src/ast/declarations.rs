//! Top-level declarations and the file/package containers.
//!
//! Declarations are neither statements nor expressions: they only appear
//! directly inside a [`File`]. A [`Package`] groups the files of one package
//! keyed by bare file name; it is assembled through
//! [`PackageBuilder`](super::builder::PackageBuilder), which rejects
//! duplicate names.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Pos,
};

use super::{
    ast::{Expr, Node, NodeType},
    expressions::{BasicLit, Ident, LitValue},
    ranges::ensure_range,
    statements::BlockStmt,
};

/// The `package name` clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageSpec {
    pub pkg_pos: Pos,
    pub name_pos: Pos,
    pub name: String,
}

impl PackageSpec {
    pub fn new(pkg_pos: Pos, name_pos: Pos, name: impl Into<String>) -> Result<Self, Error> {
        ensure_range(PackageSpec {
            pkg_pos,
            name_pos,
            name: name.into(),
        })
    }
}

impl Node for PackageSpec {
    fn pos(&self) -> Pos {
        self.pkg_pos
    }
    fn end(&self) -> Pos {
        self.name_pos.offset(self.name.len())
    }
    fn node_type(&self) -> NodeType {
        NodeType::PackageSpec
    }
}

/// `import [alias] "path"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSpec {
    pub import_pos: Pos,
    pub name: Option<Ident>,
    pub path: BasicLit,
}

impl ImportSpec {
    pub fn new(import_pos: Pos, name: Option<Ident>, path: BasicLit) -> Result<Self, Error> {
        if path.value_type != TokenKind::String {
            return Err(Error::new(
                ErrorImpl::LiteralKindMismatch {
                    kind: TokenKind::String.to_string(),
                    value: path.value.to_string(),
                },
                path.pos(),
            ));
        }

        ensure_range(ImportSpec {
            import_pos,
            name,
            path,
        })
    }

    /// The decoded import path.
    pub fn path_value(&self) -> &str {
        match &self.path.value {
            LitValue::String(path) => path,
            // ImportSpec::new only accepts string literals.
            LitValue::Int(_) | LitValue::Float(_) => &self.path.value_lit,
        }
    }
}

impl Node for ImportSpec {
    fn pos(&self) -> Pos {
        self.import_pos
    }
    fn end(&self) -> Pos {
        self.path.end()
    }
    fn node_type(&self) -> NodeType {
        NodeType::ImportSpec
    }
}

/// `const name [type] = value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstSpec {
    pub const_pos: Pos,
    pub name: Ident,
    #[serde(rename = "type")]
    pub ty: Option<Ident>,
    pub value: Expr,
}

impl ConstSpec {
    pub fn new(const_pos: Pos, name: Ident, ty: Option<Ident>, value: Expr) -> Result<Self, Error> {
        ensure_range(ConstSpec {
            const_pos,
            name,
            ty,
            value,
        })
    }
}

impl Node for ConstSpec {
    fn pos(&self) -> Pos {
        self.const_pos
    }
    fn end(&self) -> Pos {
        self.value.end()
    }
    fn node_type(&self) -> NodeType {
        NodeType::ConstSpec
    }
}

/// `var name [type] [= value]`. At least one of type and value is present
/// in parsed input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarSpec {
    pub var_pos: Pos,
    pub name: Ident,
    #[serde(rename = "type")]
    pub ty: Option<Ident>,
    pub value: Option<Expr>,
}

impl VarSpec {
    pub fn new(
        var_pos: Pos,
        name: Ident,
        ty: Option<Ident>,
        value: Option<Expr>,
    ) -> Result<Self, Error> {
        ensure_range(VarSpec {
            var_pos,
            name,
            ty,
            value,
        })
    }
}

impl Node for VarSpec {
    fn pos(&self) -> Pos {
        self.var_pos
    }
    fn end(&self) -> Pos {
        match (&self.value, &self.ty) {
            (Some(value), _) => value.end(),
            (None, Some(ty)) => ty.end(),
            (None, None) => self.name.end(),
        }
    }
    fn node_type(&self) -> NodeType {
        NodeType::VarSpec
    }
}

/// `func name() { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Func {
    pub func_pos: Pos,
    pub name_pos: Pos,
    pub name: String,
    pub body: BlockStmt,
}

impl Func {
    pub fn new(
        func_pos: Pos,
        name_pos: Pos,
        name: impl Into<String>,
        body: BlockStmt,
    ) -> Result<Self, Error> {
        ensure_range(Func {
            func_pos,
            name_pos,
            name: name.into(),
            body,
        })
    }

    /// Range of the function name, for diagnostics.
    pub fn name_span(&self) -> crate::Span {
        crate::Span::new(self.name_pos, self.name_pos.offset(self.name.len()))
    }
}

impl Node for Func {
    fn pos(&self) -> Pos {
        self.func_pos
    }
    fn end(&self) -> Pos {
        self.body.end()
    }
    fn node_type(&self) -> NodeType {
        NodeType::Func
    }
}

/// The syntax tree of one source file.
///
/// Built through [`FileBuilder`](super::builder::FileBuilder), which sets
/// the package clause first and checks ranges when finished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct File {
    pub filename: String,
    #[serde(skip)]
    pub source: String,
    pub pkg: PackageSpec,
    pub imports: Vec<ImportSpec>,
    pub consts: Vec<ConstSpec>,
    pub globals: Vec<VarSpec>,
    pub funcs: Vec<Func>,
}

impl File {
    pub fn find_func(&self, name: &str) -> Option<&Func> {
        self.funcs.iter().find(|func| func.name == name)
    }
}

impl Node for File {
    fn pos(&self) -> Pos {
        self.pkg.pos()
    }
    fn end(&self) -> Pos {
        Pos::from_offset(self.source.len())
    }
    fn node_type(&self) -> NodeType {
        NodeType::File
    }
}

/// All files of one package, keyed by bare file name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub name: String,
    pub files: BTreeMap<String, File>,
}

impl Package {
    pub fn file(&self, filename: &str) -> Option<&File> {
        self.files.get(filename)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
