//! Scanner for named-dependency `define` headers.
//!
//! Recognises `define("name", [dep, ...], function(arg, ...) {` and exposes
//! each occurrence as a `DefineHeader` borrowing from the source text.

use std::ops::Range;
use std::sync::LazyLock;

use em_ast::ImportStatement;
use regex::Regex;
use serde::Serialize;

static NAMED_DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"define\((?:"([^'"]+)"|'([^'"]+)'),\s*\[([^\]]*)\]\s*,\s*function\s*\(([^)]*)\)\s*\{"#,
    )
    .expect("named define pattern is valid")
});

/// Header of a `define("name", [deps], function(args) {` wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefineHeader<'a> {
    /// Module name without quotes.
    pub name: &'a str,
    /// Dependency specifiers, trimmed, quotes kept.
    pub dependencies: Vec<&'a str>,
    /// Factory parameter names, trimmed.
    pub parameters: Vec<&'a str>,
    /// Byte range of the header, from `define` up to and including `{`.
    pub range: Range<usize>,
}

impl<'a> DefineHeader<'a> {
    /// Whether every dependency has exactly one parameter.
    pub fn is_balanced(&self) -> bool {
        self.dependencies.len() == self.parameters.len()
    }

    /// One import per dependency, paired positionally with the parameters.
    ///
    /// A dependency without a (non-empty) parameter becomes a side-effect
    /// import; surplus parameters are ignored. The legacy build tool emitted
    /// `import undefined from dep;` there instead; the side-effect form is a
    /// deliberate departure that keeps the output loadable.
    pub fn imports(&self) -> Vec<ImportStatement<'a>> {
        self.dependencies
            .iter()
            .copied()
            .enumerate()
            .map(|(i, dependency)| {
                match self.parameters.get(i).copied().filter(|p| !p.is_empty()) {
                    Some(parameter) => ImportStatement::default_import(parameter, dependency),
                    None => ImportStatement::side_effect(dependency),
                }
            })
            .collect()
    }
}

/// Find all named-dependency headers, in source order.
pub fn scan_named_defines(source: &str) -> Vec<DefineHeader<'_>> {
    NAMED_DEFINE
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1).or_else(|| caps.get(2))?.as_str();
            Some(DefineHeader {
                name,
                dependencies: split_list(caps.get(3).map_or("", |m| m.as_str())),
                parameters: split_list(caps.get(4).map_or("", |m| m.as_str())),
                range: whole.range(),
            })
        })
        .collect()
}

/// Split a comma-separated list and trim each entry. A blank list is empty.
fn split_list(list: &str) -> Vec<&str> {
    if list.trim().is_empty() {
        return Vec::new();
    }
    list.split(',').map(str::trim).collect()
}
