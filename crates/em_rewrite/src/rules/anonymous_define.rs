//! Anonymous-form rewrite for the Xtext CodeMirror bundle.
//!
//! The bundle is a concatenation of `define('xtext/...', [deps], function(...) {`
//! wrappers that talk to each other through the loader. Dropping the
//! wrappers puts every service in one module scope; the runtime imports and
//! the export list are fixed rather than derived from the wrappers.

use std::sync::LazyLock;

use em_ast::{
    render_export, render_imports, RewriteRule, EDITOR_CONTEXT_RENAME, XTEXT_EXPORTS,
    XTEXT_RUNTIME_IMPORTS,
};
use regex::Regex;
use tracing::debug;

use super::util::{remove_all, replace_token};
use crate::error::{Result, RewriteError};

/// `define('name', [deps]?, function(args) {` with the dependency array optional.
static WRAPPER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"define\(['"][^('|"]*['"],\s*(?:\[[^\]]*\]\s*,\s*)?function\s*\([^)]*\)\s*\{"#)
        .expect("wrapper header pattern is valid")
});

/// `return Name; });`, `return exports; });` and `return {}; });`.
static RETURN_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"return\s+[A-Z][a-z]+[a-zA-Z]+;\s*\}\);|return\s+exports;\s*\}\);|return\s*\{\};\s*\}\);",
    )
    .expect("return close pattern is valid")
});

/// Unwrap the Xtext bundle into a single ES module.
pub fn rewrite_anonymous_defines(source: &str) -> String {
    let headers = WRAPPER_HEADER.find_iter(source).count();
    let body = remove_all(source, &WRAPPER_HEADER);

    let closings = RETURN_CLOSE.find_iter(&body).count();
    let body = remove_all(&body, &RETURN_CLOSE);

    let (body, renamed) = replace_token(
        &body,
        EDITOR_CONTEXT_RENAME.from,
        EDITOR_CONTEXT_RENAME.to,
    );
    debug!(headers, closings, renamed, "unwrapped xtext bundle");

    let mut result = render_imports(XTEXT_RUNTIME_IMPORTS);
    result.push_str("\n\n");
    result.push_str(&body);
    if !body.is_empty() && !body.ends_with('\n') {
        result.push('\n');
    }
    result.push_str(&render_export(XTEXT_EXPORTS));
    result.push('\n');
    result
}

/// Reject input without any wrapper header.
pub fn check_anonymous_defines(source: &str) -> Result<()> {
    if WRAPPER_HEADER.is_match(source) {
        Ok(())
    } else {
        Err(RewriteError::NoDefinition {
            rule: RewriteRule::AnonymousDefine,
        })
    }
}
