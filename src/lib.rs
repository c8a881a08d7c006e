/// The lexer takes the source input, mapping it into a sequence of tokens.
pub mod lexer;

/// The parser takes a sequence of tokens, mapping it into an AST.
pub mod parser;

/// The code generator maps the AST into TypeScript type-level code.
pub mod codegen;

pub mod ast;
pub mod token;
pub mod util;

pub use codegen::Target;

use crate::{codegen::CompileError, parser::SyntaxError};

/// Compiles Tartak source text into TypeScript.
pub fn compile(src: &str, target: Target) -> Result<String, Error> {
    let program = parser::parse_program(src)?;
    Ok(codegen::generate(target, &program)?)
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("syntax error at {0}")]
    Syntax(SyntaxError),
    #[error("compile error at {0}")]
    Compile(CompileError),
}

impl From<SyntaxError> for Error {
    fn from(error: SyntaxError) -> Self {
        Error::Syntax(error)
    }
}

impl From<CompileError> for Error {
    fn from(error: CompileError) -> Self {
        Error::Compile(error)
    }
}
