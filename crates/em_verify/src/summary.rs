//! Linkage summary of a parsed module.
//!
//! Walks the top-level declarations and records what the module imports and
//! which names it exports.

use serde::Serialize;
use swc_common::{SourceMap, SourceMapper, Span};
use swc_ecma_ast::{
    Decl, ExportDecl, ExportDefaultDecl, ExportDefaultExpr, ExportSpecifier, ImportDecl,
    ImportSpecifier, ModuleExportName, NamedExport, Pat,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::parse::ParseResult;

/// One `import` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportRecord {
    /// Module specifier without quotes.
    pub specifier: String,
    /// Local names bound by the import. Empty for side-effect imports.
    pub bindings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub imports: Vec<ImportRecord>,
    /// Exported names in declaration order; `default` for default exports.
    pub exports: Vec<String>,
}

impl ModuleSummary {
    pub fn exports_name(&self, name: &str) -> bool {
        self.exports.iter().any(|e| e == name)
    }
}

/// Collect the imports and exports of a parsed module.
pub fn summarize(parsed: &ParseResult) -> ModuleSummary {
    let mut collector = LinkageCollector {
        source_map: &parsed.source_map,
        summary: ModuleSummary::default(),
    };
    parsed.module.visit_with(&mut collector);
    collector.summary
}

/// Names from `expected` the module does not export, in `expected` order.
pub fn missing_exports(summary: &ModuleSummary, expected: &[&str]) -> Vec<String> {
    expected
        .iter()
        .filter(|name| !summary.exports_name(name))
        .map(|name| name.to_string())
        .collect()
}

struct LinkageCollector<'a> {
    source_map: &'a SourceMap,
    summary: ModuleSummary,
}

impl LinkageCollector<'_> {
    fn unquoted(&self, span: Span) -> String {
        let text = self.source_map.span_to_snippet(span).unwrap_or_default();
        text.trim_matches(|c| c == '\'' || c == '"').to_string()
    }

    fn export_name(&self, name: &ModuleExportName) -> String {
        match name {
            ModuleExportName::Ident(ident) => ident.sym.to_string(),
            ModuleExportName::Str(s) => self.unquoted(s.span),
        }
    }
}

impl Visit for LinkageCollector<'_> {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        let bindings = node
            .specifiers
            .iter()
            .map(|spec| match spec {
                ImportSpecifier::Named(named) => named.local.sym.to_string(),
                ImportSpecifier::Default(default) => default.local.sym.to_string(),
                ImportSpecifier::Namespace(ns) => ns.local.sym.to_string(),
            })
            .collect();

        self.summary.imports.push(ImportRecord {
            specifier: self.unquoted(node.src.span),
            bindings,
        });
    }

    fn visit_named_export(&mut self, node: &NamedExport) {
        for spec in &node.specifiers {
            let name = match spec {
                ExportSpecifier::Named(named) => {
                    self.export_name(named.exported.as_ref().unwrap_or(&named.orig))
                }
                ExportSpecifier::Namespace(ns) => self.export_name(&ns.name),
                ExportSpecifier::Default(default) => default.exported.sym.to_string(),
            };
            self.summary.exports.push(name);
        }
    }

    fn visit_export_decl(&mut self, node: &ExportDecl) {
        match &node.decl {
            Decl::Fn(f) => self.summary.exports.push(f.ident.sym.to_string()),
            Decl::Class(c) => self.summary.exports.push(c.ident.sym.to_string()),
            Decl::Var(var) => {
                for declarator in &var.decls {
                    if let Pat::Ident(binding) = &declarator.name {
                        self.summary.exports.push(binding.id.sym.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    fn visit_export_default_decl(&mut self, _: &ExportDefaultDecl) {
        self.summary.exports.push("default".to_string());
    }

    fn visit_export_default_expr(&mut self, _: &ExportDefaultExpr) {
        self.summary.exports.push("default".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_module;

    fn summary_of(code: &str) -> ModuleSummary {
        summarize(&parse_module(code, "test.js").unwrap())
    }

    #[test]
    fn collects_imports() {
        let summary = summary_of(
            "import a from 'x';\nimport 'y';\nimport * as ns from \"z\";\nimport { p, q as r } from 'w';\n",
        );
        assert_eq!(
            summary.imports,
            vec![
                ImportRecord {
                    specifier: "x".into(),
                    bindings: vec!["a".into()],
                },
                ImportRecord {
                    specifier: "y".into(),
                    bindings: vec![],
                },
                ImportRecord {
                    specifier: "z".into(),
                    bindings: vec!["ns".into()],
                },
                ImportRecord {
                    specifier: "w".into(),
                    bindings: vec!["p".into(), "r".into()],
                },
            ]
        );
    }

    #[test]
    fn collects_exports_in_order() {
        let summary = summary_of(
            "var a, b;\nexport { a, b as c };\nexport function f() {}\nexport const g = 1;\nexport default 1;\n",
        );
        assert_eq!(summary.exports, vec!["a", "c", "f", "g", "default"]);
    }

    #[test]
    fn string_specifiers_are_unquoted() {
        let summary = summary_of("import \"./x.js\";\nvar a;\nexport { a as \"kebab-name\" };\n");
        assert_eq!(summary.imports[0].specifier, "./x.js");
        assert_eq!(summary.exports, vec!["kebab-name"]);
    }

    #[test]
    fn reports_missing_exports() {
        let summary = summary_of("var a;\nexport { a };\n");
        assert_eq!(missing_exports(&summary, &["a", "b", "c"]), vec!["b", "c"]);
        assert!(missing_exports(&summary, &["a"]).is_empty());
    }
}
