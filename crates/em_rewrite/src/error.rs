//! Errors reported by strict-mode rewriting.

use em_ast::RewriteRule;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RewriteError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RewriteError {
    /// Dependency list and factory parameters differ in length.
    #[error(
        "define(\"{module}\") lists {dependencies} dependencies but its factory takes {parameters} parameters"
    )]
    ArityMismatch {
        module: String,
        dependencies: usize,
        parameters: usize,
    },

    /// The file matched a rule but carries no wrapper for it to remove.
    #[error("no module definition found for {rule} rewrite")]
    NoDefinition { rule: RewriteRule },
}
