use std::{fmt, fs::File, io::Read, path::Path};

use tracing::debug;

use crate::errors::{Pl0Error, Pl0Result};
use crate::ir::{Bytecode, IRGenerator};
use crate::semantic::resolver::{resolve, ResolvedProgram};
use crate::utils::config::cli::SOURCE_EXTENSION;
use crate::vm::{ExitOutcome, ProgramIo, VirtualMachine};

pub mod ast;
pub mod frontend;
pub mod ir;
pub mod semantic;
pub mod utils;
pub mod vm;

pub use utils::errors;

pub const VERSION: &str = "0.1.0";

/// A 1-based line/column location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Everything the front end and code generator produced for one source text.
pub struct Compilation {
    pub token_count: usize,
    pub program: ResolvedProgram,
    pub bytecode: Bytecode,
}

/// Lex, parse, resolve and lower `source` to bytecode.
pub fn compile(source: &str) -> Pl0Result<Compilation> {
    let tokens = frontend::lexer::scan(source)?;
    let token_count = tokens.len();
    debug!(tokens = token_count, "lexical analysis completed");

    let program = frontend::parser::parse(&tokens)?;
    debug!(program = %program.name, "parsing completed");

    let program = resolve(program)?;
    debug!(procedures = program.procedure_count, "name resolution completed");

    let bytecode = IRGenerator::new().generate_code(&program)?;
    debug!(instructions = bytecode.len(), "code generation completed");

    Ok(Compilation { token_count, program, bytecode })
}

/// Compile `source` and run it against `io`.
pub fn run(source: &str, io: &mut dyn ProgramIo) -> Pl0Result<ExitOutcome> {
    let compilation = compile(source)?;
    VirtualMachine::new().run(&compilation.bytecode, io)
}

pub fn read(filename: &Path) -> Pl0Result<String> {
    match filename.extension() {
        Some(ext) if ext == SOURCE_EXTENSION => {}
        _ => {
            return Err(Pl0Error::FileReadError(format!(
                "{}: file must have a .{} extension",
                filename.display(),
                SOURCE_EXTENSION
            )));
        }
    }
    let mut file = File::open(filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}
