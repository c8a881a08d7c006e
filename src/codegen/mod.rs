//! Compiles the AST into TypeScript type-level code.
//!
//! The type language has no closures, no sequencing and no operators beyond
//! unions and intersections. Lambdas and match arms are lifted into top-level
//! interfaces extending `Fn` that receive their captured values as a tuple,
//! `let` bindings become single-evaluation `extends infer` conditionals, and
//! operators lower to combinators imported from the external libraries.

use crate::{
    ast::Program,
    codegen::{generator::Generator, target_env::TargetEnv},
    token::Located,
};

pub mod generator;
pub mod lowering;
pub mod scope;
pub mod target_env;

#[cfg(test)]
mod tests;

pub type CompileError = Located<Error>;

/// The most pattern variables a single match arm may bind.
pub const MAX_PATTERN_VARIABLES: usize = 4;

pub fn generate(target: Target, program: &Program) -> Result<String, CompileError> {
    type PublishedGenerator<'a> = Generator<'a, target_env::Published>;
    type LocalGenerator<'a> = Generator<'a, target_env::Local>;

    match target {
        Target::Published => PublishedGenerator::new().generate(program),
        Target::Local => LocalGenerator::new().generate(program),
    }
}

/// Selects where the generated code imports the external libraries from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Target {
    /// The packages shipped with the compiler.
    #[default]
    Published,
    /// The upstream packages and a path-aliased prelude, for working inside
    /// the compiler's own repository.
    Local,
}

impl Target {
    pub const ALL: &[Target] = &[Target::Published, Target::Local];

    pub const fn name(&self) -> &'static str {
        match self {
            Target::Published => target_env::Published::NAME,
            Target::Local => target_env::Local::NAME,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unsupported method `{0}`")]
    UnsupportedMethod(Box<str>),
    #[error("too many pattern variables in one match arm (at most {})", MAX_PATTERN_VARIABLES)]
    TooManyPatternVariables,
    #[error("`infer` is only allowed in match patterns")]
    InferOutsidePattern,
    #[error("assignments can't be compiled")]
    AssignmentUnsupported,
    #[error("only `let` declarations may come before the end of a block")]
    StatementBeforeBlockEnd,
    #[error("a block must end with an expression")]
    BlockWithoutResult,
    #[error("`AssertEqual` is only allowed in sections")]
    AssertionOutsideSection,
}
