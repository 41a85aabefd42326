//! Verification of rewritten modules.
//!
//! The rewriter never parses; this crate does, after the fact. Output is fed
//! to the SWC parser as an ECMAScript module and its top-level `import` and
//! `export` declarations are collected into a `ModuleSummary`.

pub mod parse;
pub mod summary;

pub use parse::{parse_module, ParseResult};
pub use summary::{missing_exports, summarize, ImportRecord, ModuleSummary};

/// Parse `code` as a module and summarize its linkage.
pub fn verify(code: &str, filename: &str) -> anyhow::Result<ModuleSummary> {
    let parsed = parse_module(code, filename)?;
    Ok(summarize(&parsed))
}
