use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use ugo_ast::{
    ast::{
        ast::{Expr, Node, Stmt},
        declarations::{File, Package},
        printer::print_file,
        walk::{walk_file, NodeRef, Visitor},
    },
    errors::errors::{Error, ErrorTip},
    line_at_position,
    parser::parse_file,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse µGo files into a package syntax tree", long_about = None)]
struct Cli {
    /// Source files of one package
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Expected package name (defaults to the first file's package clause)
    #[arg(short, long)]
    package: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Source)]
    format: Format,

    /// Log verbosity (-v debug, -vv trace); overrides RUST_LOG
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    /// Re-print as µGo source
    Source,
    /// Dump the tree as JSON
    Json,
    /// Indented node types with their ranges
    Tree,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut sources = vec![];
    for path in &cli.files {
        let source = read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .with_context(|| format!("{} has no file name", path.display()))?;
        sources.push((path.as_path(), filename, source));
    }

    let mut files = vec![];
    for (path, filename, source) in &sources {
        match parse_file(filename, source) {
            Ok(file) => files.push(file),
            Err(error) => {
                display_error(&error, path, source);
                bail!("failed to parse {}", path.display());
            }
        }
    }

    let name = match (&cli.package, files.first()) {
        (Some(name), _) => name.clone(),
        (None, Some(file)) => file.pkg.name.clone(),
        (None, None) => bail!("no input files"),
    };
    debug!(package = %name, files = files.len(), "assembling package");

    let mut builder = Package::builder(&name);
    for file in files {
        let filename = file.filename.clone();
        if let Err(error) = builder.add_file(file) {
            match sources.iter().find(|(_, candidate, _)| *candidate == filename) {
                Some((path, _, source)) if error.get_position() != ugo_ast::Pos::null() => {
                    display_error(&error, path, source)
                }
                _ => eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip()),
            }
            bail!("failed to assemble package {}", name);
        }
    }
    let package = builder.build();
    info!(package = %package.name, files = package.len(), "parsed");

    match cli.format {
        Format::Source => {
            for file in package.files.values() {
                if package.len() > 1 {
                    println!("// {}", file.filename);
                }
                print!("{}", print_file(file));
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&package)?),
        Format::Tree => {
            for file in package.files.values() {
                print!("{}", print_tree(file));
            }
        }
    }

    Ok(())
}

struct TreePrinter {
    depth: usize,
    out: String,
}

impl<'ast> Visitor<'ast> for TreePrinter {
    fn enter(&mut self, node: NodeRef<'ast>) -> bool {
        let label = match node {
            NodeRef::File(file) => format!(" {}", file.filename),
            NodeRef::PackageSpec(spec) => format!(" {}", spec.name),
            NodeRef::Func(func) => format!(" {}", func.name),
            NodeRef::Ident(ident) => format!(" {}", ident.name),
            NodeRef::BasicLit(lit) => format!(" {}", lit.value_lit),
            NodeRef::Stmt(Stmt::Assign(assign)) => format!(" {}", assign.op),
            NodeRef::Expr(expr) => match expr {
                Expr::Ident(ident) => format!(" {}", ident.name),
                Expr::Number(number) => format!(" {}", number.value),
                Expr::BasicLit(lit) => format!(" {}", lit.value_lit),
                Expr::Binary(binary) => format!(" {}", binary.op),
                Expr::Unary(unary) => format!(" {}", unary.op),
                Expr::Paren(_) | Expr::Call(_) | Expr::Selector(_) => String::new(),
            },
            NodeRef::ImportSpec(_)
            | NodeRef::ConstSpec(_)
            | NodeRef::VarSpec(_)
            | NodeRef::BlockStmt(_)
            | NodeRef::Stmt(Stmt::Expr(_)) => String::new(),
        };

        self.out.push_str(&format!(
            "{}{}{} [{}, {})\n",
            "  ".repeat(self.depth),
            node.node_type(),
            label,
            node.pos(),
            node.end()
        ));
        self.depth += 1;
        true
    }

    fn leave(&mut self, _node: NodeRef<'ast>) {
        self.depth -= 1;
    }
}

fn print_tree(file: &File) -> String {
    let mut printer = TreePrinter {
        depth: 0,
        out: String::new(),
    };
    walk_file(&mut printer, file);
    printer.out
}

fn display_error(error: &Error, file: &Path, source: &str) {
    /*
        Error: name (tip)
        -> main.go
           |
        20 | x := @
           | -----^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", file.display());

    let Some((line, line_text, line_pos)) = line_at_position(source, error.get_position()) else {
        eprintln!("   at offset {}", error.get_position());
        return;
    };

    let line_str = line.to_string();
    let padding = line_str.len() + 2;
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_str, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .char_indices()
        .find(|(_, c)| *c != ' ' && *c != '\t')
        .map(|(index, _)| index)
        .unwrap_or(string.len());

    (String::from(&string[start..]), start)
}
