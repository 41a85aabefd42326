use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use em_ast::{
    RewriteOptions, RewriteRule, TransformedUnit, SAPL_MODE_SUFFIX, XTEXT_CODEMIRROR_SUFFIX,
    XTEXT_EXPORTS,
};
use em_rewrite::{scan_named_defines, transform_with, DefineHeader};
use em_verify::{missing_exports, verify, ModuleSummary};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where the editor build leaves its frontend resources.
const DEFAULT_FRONTEND_DIR: &str = "target/classes/META-INF/frontend";

#[derive(Parser)]
#[command(name = "esmify", about = "esmify: rewrite AMD editor bundles as ES modules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Reject arity mismatches and files without a define wrapper.
    #[arg(long, global = true)]
    strict: bool,
    /// JSON file with rewrite options.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log every rewrite step.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite one file and emit the result.
    Transform {
        input: PathBuf,
        /// Output file (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// File id used to pick the rule (defaults to the input path).
        #[arg(long)]
        id: Option<String>,
    },
    /// Rewrite sapl-mode.js and xtext-codemirror.js in place.
    Convert {
        /// Frontend resource directory.
        #[arg(default_value = DEFAULT_FRONTEND_DIR)]
        dir: PathBuf,
    },
    /// Rewrite a file and check the result parses as an ES module.
    Check {
        input: PathBuf,
        #[arg(long)]
        id: Option<String>,
        /// Print the module summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the named define headers in a file.
    Inspect {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let options = load_options(cli.config.as_deref(), cli.strict)?;

    match cli.command {
        Commands::Transform { input, output, id } => {
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let id = id.unwrap_or_else(|| input.display().to_string());

            let unit = transform_with(&id, &source, &options)
                .with_context(|| format!("failed to transform {id}"))?;

            match &output {
                Some(path) => std::fs::write(path, &unit.code)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{}", unit.code),
            }
        }
        Commands::Convert { dir } => {
            convert_dir(&dir, &options)?;
        }
        Commands::Check { input, id, json } => {
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let id = id.unwrap_or_else(|| input.display().to_string());

            let unit = transform_with(&id, &source, &options)
                .with_context(|| format!("failed to transform {id}"))?;
            let summary = check_output(&id, &unit)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&check_report(&unit, &summary))?);
            } else {
                for import in &summary.imports {
                    if import.bindings.is_empty() {
                        println!("import '{}'", import.specifier);
                    } else {
                        println!("import {} from '{}'", import.bindings.join(", "), import.specifier);
                    }
                }
                if !summary.exports.is_empty() {
                    println!("export {}", summary.exports.join(", "));
                }
                eprintln!("OK: {id} ({})", unit.rule);
            }
        }
        Commands::Inspect { input, json } => {
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let headers = scan_named_defines(&source);

            if json {
                println!("{}", serde_json::to_string_pretty(&headers)?);
            } else {
                print!("{}", render_headers(&headers));
            }
        }
    }

    Ok(())
}

/// Parse the rewritten code and, for the Xtext bundle, make sure every
/// fixed symbol is exported.
fn check_output(id: &str, unit: &TransformedUnit) -> Result<ModuleSummary> {
    let summary = verify(&unit.code, id)?;

    if unit.rule == RewriteRule::AnonymousDefine {
        let missing = missing_exports(&summary, XTEXT_EXPORTS);
        if !missing.is_empty() {
            bail!("{id}: missing exports: {}", missing.join(", "));
        }
    }

    Ok(summary)
}

fn check_report(unit: &TransformedUnit, summary: &ModuleSummary) -> serde_json::Value {
    json!({
        "rule": unit.rule,
        "imports": summary.imports,
        "exports": summary.exports,
    })
}

/// One line per header: `name: [deps] -> (params)`.
fn render_headers(headers: &[DefineHeader<'_>]) -> String {
    let mut out = String::new();
    for header in headers {
        let marker = if header.is_balanced() { "" } else { "  (arity mismatch)" };
        out.push_str(&format!(
            "{}: [{}] -> ({}){marker}\n",
            header.name,
            header.dependencies.join(", "),
            header.parameters.join(", "),
        ));
    }
    out
}

fn load_options(config: Option<&Path>, strict: bool) -> Result<RewriteOptions> {
    let mut options = match config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => RewriteOptions::default(),
    };
    if strict {
        options.strict = true;
    }
    Ok(options)
}

/// Rewrite the two known bundles in `dir`, skipping any that are absent.
fn convert_dir(dir: &Path, options: &RewriteOptions) -> Result<()> {
    for name in [SAPL_MODE_SUFFIX, XTEXT_CODEMIRROR_SUFFIX] {
        let path = dir.join(name);
        if !path.is_file() {
            warn!(path = %path.display(), "not found, skipping");
            continue;
        }

        let id = path.display().to_string();
        let source =
            std::fs::read_to_string(&path).with_context(|| format!("failed to read {id}"))?;
        let unit = transform_with(&id, &source, options)
            .with_context(|| format!("failed to transform {id}"))?;
        std::fs::write(&path, &unit.code).with_context(|| format!("failed to write {id}"))?;

        info!(path = %id, rule = %unit.rule, "converted");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_rewrites_known_files_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let sapl = dir.path().join(SAPL_MODE_SUFFIX);
        std::fs::write(
            &sapl,
            "define('sapl-mode', ['codemirror'], function(CodeMirror) {\n  CodeMirror.defineMode('sapl', f);\n});\n",
        )
        .unwrap();
        let untouched = dir.path().join("json-editor.js");
        std::fs::write(&untouched, "define('x', [], function() {});\n").unwrap();

        convert_dir(dir.path(), &RewriteOptions::default()).unwrap();

        assert_eq!(
            std::fs::read_to_string(&sapl).unwrap(),
            "import CodeMirror from 'codemirror';\n\n  CodeMirror.defineMode('sapl', f);\n"
        );
        assert_eq!(
            std::fs::read_to_string(&untouched).unwrap(),
            "define('x', [], function() {});\n"
        );
        assert!(!dir.path().join(XTEXT_CODEMIRROR_SUFFIX).exists());
    }

    #[test]
    fn convert_fails_in_strict_mode_on_bad_arity() {
        let dir = tempfile::tempdir().unwrap();
        let sapl = dir.path().join(SAPL_MODE_SUFFIX);
        let original = "define('sapl-mode', ['a', 'b'], function(a) {\n});\n";
        std::fs::write(&sapl, original).unwrap();

        let options = RewriteOptions {
            strict: true,
            ..Default::default()
        };
        assert!(convert_dir(dir.path(), &options).is_err());
        assert_eq!(std::fs::read_to_string(&sapl).unwrap(), original);
    }

    #[test]
    fn config_file_is_merged_with_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("esmify.json");
        std::fs::write(&config, r#"{ "anonymous_define": false }"#).unwrap();

        let options = load_options(Some(config.as_path()), true).unwrap();
        assert!(options.strict);
        assert!(options.named_define);
        assert!(!options.anonymous_define);
    }

    #[test]
    fn invalid_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("esmify.json");
        std::fs::write(&config, "{ strict: yes }").unwrap();

        let err = load_options(Some(config.as_path()), false).unwrap_err();
        assert!(err.to_string().starts_with("invalid config"));
    }

    const XTEXT_SOURCE: &str = "define('xtext/xtext-codemirror', ['jquery'], function(jQuery) {\n\
var exports = {};\n\
var ServiceBuilder, EditorContext, XtextService, LoadResourceService, SaveResourceService,\n\
HighlightingService, ValidationService, UpdateService, ContentAssistService, HoverService,\n\
OccurrencesService, FormattingService;\n\
return exports;\n\
});\n";

    #[test]
    fn check_accepts_rewritten_xtext_bundle() {
        let unit = transform_with("xtext-codemirror.js", XTEXT_SOURCE, &RewriteOptions::default())
            .unwrap();
        let summary = check_output("xtext-codemirror.js", &unit).unwrap();
        assert_eq!(summary.exports.len(), XTEXT_EXPORTS.len());

        let report = check_report(&unit, &summary);
        assert_eq!(report["rule"], "anonymous-define");
        assert_eq!(report["exports"][0], "exports");
        assert_eq!(report["imports"][0]["specifier"], "jquery");
    }

    #[test]
    fn check_reports_missing_xtext_exports() {
        let mut unit =
            transform_with("xtext-codemirror.js", XTEXT_SOURCE, &RewriteOptions::default())
                .unwrap();
        let export_start = unit.code.rfind("export {").unwrap();
        unit.code.truncate(export_start);

        let err = check_output("xtext-codemirror.js", &unit).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("xtext-codemirror.js: missing exports: exports, ServiceBuilder"));
        assert!(message.ends_with("FormattingService"));
    }

    #[test]
    fn check_rejects_unparseable_output() {
        let unit = transform_with(
            "sapl-mode.js",
            "define('a', [p], function(x) {\n});\ndefine('b', [q], function(y) {\n});\n",
            &RewriteOptions::default(),
        )
        .unwrap();
        assert!(check_output("sapl-mode.js", &unit).is_err());
    }

    #[test]
    fn inspect_lists_headers() {
        let source = "define('ok', ['a', 'b'], function(x, y) {\n});\ndefine('bad', ['c', 'd'], function(z) {\n});\n";
        let headers = scan_named_defines(source);
        assert_eq!(
            render_headers(&headers),
            "ok: ['a', 'b'] -> (x, y)\nbad: ['c', 'd'] -> (z)  (arity mismatch)\n"
        );

        let value = serde_json::to_value(&headers).unwrap();
        assert_eq!(value[0]["name"], "ok");
        assert_eq!(value[1]["dependencies"][1], "'d'");
        assert_eq!(value[1]["parameters"].as_array().unwrap().len(), 1);
    }
}
