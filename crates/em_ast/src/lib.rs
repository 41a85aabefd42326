//! Data model for esmify.
//!
//! Describes what the rewriter works with:
//! - Which rewrite rule applies to a file (`RewriteRule`)
//! - Synthesized `import` declarations (`ImportStatement`)
//! - The fixed import/export tables for the Xtext CodeMirror bundle
//! - Options controlling which rules run and how strictly

use serde::{Deserialize, Serialize};

/// File-name suffix selecting the named-dependency rewrite.
pub const SAPL_MODE_SUFFIX: &str = "sapl-mode.js";

/// File-name suffix selecting the anonymous-form rewrite.
pub const XTEXT_CODEMIRROR_SUFFIX: &str = "xtext-codemirror.js";

/// The rewrite procedure chosen for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriteRule {
    /// `define("name", [deps], function(args) {` → one import per dependency.
    NamedDefine,
    /// Xtext wrappers → fixed imports, renamed body, fixed export list.
    AnonymousDefine,
    /// Content is passed through untouched.
    Identity,
}

impl RewriteRule {
    /// Select the rule for a file id by case-sensitive suffix match.
    pub fn for_id(id: &str) -> Self {
        if id.ends_with(SAPL_MODE_SUFFIX) {
            RewriteRule::NamedDefine
        } else if id.ends_with(XTEXT_CODEMIRROR_SUFFIX) {
            RewriteRule::AnonymousDefine
        } else {
            RewriteRule::Identity
        }
    }
}

impl std::fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RewriteRule::NamedDefine => write!(f, "named-define"),
            RewriteRule::AnonymousDefine => write!(f, "anonymous-define"),
            RewriteRule::Identity => write!(f, "identity"),
        }
    }
}

/// A single top-level `import` declaration.
///
/// `specifier` keeps the quotes it was written with, so a dependency lifted
/// out of a `define` list is emitted exactly as it appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImportStatement<'a> {
    /// Default binding. `None` renders a side-effect import.
    pub binding: Option<&'a str>,
    pub specifier: &'a str,
}

impl<'a> ImportStatement<'a> {
    pub const fn default_import(binding: &'a str, specifier: &'a str) -> Self {
        Self {
            binding: Some(binding),
            specifier,
        }
    }

    pub const fn side_effect(specifier: &'a str) -> Self {
        Self {
            binding: None,
            specifier,
        }
    }
}

impl std::fmt::Display for ImportStatement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.binding {
            Some(binding) => write!(f, "import {} from {};", binding, self.specifier),
            None => write!(f, "import {};", self.specifier),
        }
    }
}

/// Render imports one per line, in order.
pub fn render_imports(imports: &[ImportStatement<'_>]) -> String {
    imports
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runtime dependencies of the Xtext CodeMirror bundle, prepended to every
/// rewritten `xtext-codemirror.js` regardless of its `define` lists.
pub const XTEXT_RUNTIME_IMPORTS: &[ImportStatement<'static>] = &[
    ImportStatement::default_import("jQuery", "'jquery'"),
    ImportStatement::default_import("CodeMirror", "'codemirror'"),
    ImportStatement::default_import("ShowHint", "'codemirror/addon/hint/show-hint.js'"),
    ImportStatement::side_effect("'codemirror/mode/javascript/javascript.js'"),
];

/// Symbols the Xtext bundle registered with its module loader, exported in
/// this order from the rewritten file.
pub const XTEXT_EXPORTS: &[&str] = &[
    "exports",
    "ServiceBuilder",
    "EditorContext",
    "XtextService",
    "LoadResourceService",
    "SaveResourceService",
    "HighlightingService",
    "ValidationService",
    "UpdateService",
    "ContentAssistService",
    "HoverService",
    "OccurrencesService",
    "FormattingService",
];

/// Render `export { a, b, ... };` for the given names.
pub fn render_export(names: &[&str]) -> String {
    format!("export {{ {} }};", names.join(", "))
}

/// A whole-token identifier substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameRule {
    pub from: &'static str,
    pub to: &'static str,
}

/// The Xtext editor context is published under a shorter name.
pub const EDITOR_CONTEXT_RENAME: RenameRule = RenameRule {
    from: "CodeMirrorEditorContext",
    to: "EditorContext",
};

/// Options controlling which rules are active and whether malformed
/// definitions are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteOptions {
    pub named_define: bool,
    pub anonymous_define: bool,
    /// Reject arity mismatches and files without any `define` wrapper
    /// instead of rewriting them best-effort.
    pub strict: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            named_define: true,
            anonymous_define: true,
            strict: false,
        }
    }
}

impl RewriteOptions {
    /// Rule to run for `id`, taking disabled rules into account.
    pub fn rule_for(&self, id: &str) -> RewriteRule {
        match RewriteRule::for_id(id) {
            RewriteRule::NamedDefine if !self.named_define => RewriteRule::Identity,
            RewriteRule::AnonymousDefine if !self.anonymous_define => RewriteRule::Identity,
            rule => rule,
        }
    }
}

/// Result of rewriting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedUnit {
    pub rule: RewriteRule,
    pub code: String,
}
