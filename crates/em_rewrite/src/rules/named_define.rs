//! Named-dependency rewrite for `sapl-mode.js`.
//!
//! `define("m", [a, b], function(x, y) { BODY });` becomes
//!
//! ```text
//! import x from a;
//! import y from b;
//! BODY
//! ```

use em_ast::{render_imports, RewriteRule};
use tracing::debug;

use super::util::strip_trailing_close;
use crate::error::{Result, RewriteError};
use crate::header::scan_named_defines;

/// Lift every named `define` header into import statements.
///
/// Imports from all headers are collected in source order and placed at the
/// top; each header is cut out and its body left where it was. A final `});`
/// is dropped.
///
/// Text without any header is returned unchanged, including a trailing
/// `});`. Stripping it there would make the rule eat one closing per run, so
/// rewriting its own output would no longer be a no-op.
pub fn rewrite_named_defines(source: &str) -> String {
    let headers = scan_named_defines(source);
    if headers.is_empty() {
        return source.to_string();
    }

    let mut imports = Vec::new();
    let mut body = String::with_capacity(source.len());
    let mut last = 0;

    for header in &headers {
        debug!(
            module = header.name,
            dependencies = header.dependencies.len(),
            "lifting define header"
        );
        imports.extend(header.imports());
        body.push_str(&source[last..header.range.start]);
        last = header.range.end;
    }
    body.push_str(&source[last..]);

    let mut result = format!("{}\n{}", render_imports(&imports), body);
    strip_trailing_close(&mut result);
    result
}

/// Reject input that has no header or pairs dependencies and parameters
/// unevenly.
pub fn check_named_defines(source: &str) -> Result<()> {
    let headers = scan_named_defines(source);
    if headers.is_empty() {
        return Err(RewriteError::NoDefinition {
            rule: RewriteRule::NamedDefine,
        });
    }

    for header in &headers {
        if !header.is_balanced() {
            return Err(RewriteError::ArityMismatch {
                module: header.name.to_string(),
                dependencies: header.dependencies.len(),
                parameters: header.parameters.len(),
            });
        }
    }

    Ok(())
}
