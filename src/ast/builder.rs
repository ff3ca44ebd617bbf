//! Assembly of files and packages.
//!
//! Individual nodes are built through their own `new` constructors. The
//! builders here cover the two containers whose invariants span several
//! nodes: a [`File`] always starts from its package clause and is range
//! checked as a whole, and a [`Package`] never holds two files with the same
//! name.

use std::{collections::BTreeMap, path::Path};

use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Pos,
};

use super::{
    ast::Node,
    declarations::{ConstSpec, File, Func, ImportSpec, Package, PackageSpec, VarSpec},
    ranges::check_file,
};

/// Collects the declarations of one file in source order.
pub struct FileBuilder {
    file: File,
}

impl FileBuilder {
    pub fn new(filename: impl Into<String>, source: impl Into<String>, pkg: PackageSpec) -> Self {
        FileBuilder {
            file: File {
                filename: filename.into(),
                source: source.into(),
                pkg,
                imports: vec![],
                consts: vec![],
                globals: vec![],
                funcs: vec![],
            },
        }
    }

    pub fn import(&mut self, spec: ImportSpec) -> &mut Self {
        self.file.imports.push(spec);
        self
    }

    pub fn constant(&mut self, spec: ConstSpec) -> &mut Self {
        self.file.consts.push(spec);
        self
    }

    pub fn global(&mut self, spec: VarSpec) -> &mut Self {
        self.file.globals.push(spec);
        self
    }

    pub fn func(&mut self, func: Func) -> &mut Self {
        self.file.funcs.push(func);
        self
    }

    /// Checks every range in the file and returns it.
    pub fn finish(self) -> Result<File, Error> {
        check_file(&self.file)?;
        trace!(
            filename = %self.file.filename,
            imports = self.file.imports.len(),
            consts = self.file.consts.len(),
            globals = self.file.globals.len(),
            funcs = self.file.funcs.len(),
            "file built"
        );
        Ok(self.file)
    }
}

/// Assembles a [`Package`], rejecting duplicate and non-bare file names.
#[derive(Debug)]
pub struct PackageBuilder {
    name: String,
    files: BTreeMap<String, File>,
}

impl PackageBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        PackageBuilder {
            name: name.into(),
            files: BTreeMap::new(),
        }
    }

    /// Adds a file under its `filename`.
    ///
    /// Fails with `InvalidFilename` if the name carries a directory
    /// component, `PackageNameMismatch` if the file's package clause names
    /// another package, and `DuplicateFile` if the name is already taken.
    /// A failed call leaves the builder unchanged.
    pub fn add_file(&mut self, file: File) -> Result<&mut Self, Error> {
        if !is_bare_filename(&file.filename) {
            return Err(Error::new(
                ErrorImpl::InvalidFilename {
                    filename: file.filename,
                },
                Pos::null(),
            ));
        }

        if file.pkg.name != self.name {
            return Err(Error::new(
                ErrorImpl::PackageNameMismatch {
                    expected: self.name.clone(),
                    received: file.pkg.name.clone(),
                },
                file.pkg.name_pos,
            ));
        }

        if self.files.contains_key(&file.filename) {
            debug!(package = %self.name, filename = %file.filename, "duplicate file rejected");
            return Err(Error::new(
                ErrorImpl::DuplicateFile {
                    filename: file.filename,
                },
                Pos::null(),
            ));
        }

        trace!(package = %self.name, filename = %file.filename, end = %file.end(), "file added");
        self.files.insert(file.filename.clone(), file);
        Ok(self)
    }

    pub fn build(self) -> Package {
        Package {
            name: self.name,
            files: self.files,
        }
    }
}

impl Package {
    pub fn builder(name: impl Into<String>) -> PackageBuilder {
        PackageBuilder::new(name)
    }

    /// Builds a package from `files`, failing on the first rejected file.
    pub fn from_files(
        name: impl Into<String>,
        files: impl IntoIterator<Item = File>,
    ) -> Result<Package, Error> {
        let mut builder = PackageBuilder::new(name);
        for file in files {
            builder.add_file(file)?;
        }
        Ok(builder.build())
    }
}

fn is_bare_filename(filename: &str) -> bool {
    !filename.contains('\\')
        && Path::new(filename)
            .file_name()
            .is_some_and(|name| name == filename)
}
