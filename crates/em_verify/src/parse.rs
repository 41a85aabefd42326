use anyhow::{anyhow, bail, Result};
use swc_common::{errors::Handler, sync::Lrc, FileName, SourceMap};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{EsSyntax, Syntax};

/// Result of parsing a rewritten file.
pub struct ParseResult {
    pub module: swc_ecma_ast::Module,
    pub source_map: Lrc<SourceMap>,
}

/// Parse JavaScript source as an ECMAScript module.
///
/// Syntax errors are emitted as diagnostics on stderr. Errors the parser
/// recovers from still fail the parse: the bundler consuming the output
/// would reject them.
pub fn parse_module(code: &str, filename: &str) -> Result<ParseResult> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        code.to_string(),
    );

    let handler =
        Handler::with_emitter_writer(Box::new(std::io::stderr()), Some(source_map.clone()));

    let mut recovered = vec![];
    let module = swc_ecma_parser::parse_file_as_module(
        &source_file,
        Syntax::Es(EsSyntax::default()),
        EsVersion::latest(),
        None,
        &mut recovered,
    )
    .map_err(|e| {
        e.into_diagnostic(&handler).emit();
        anyhow!("failed to parse {filename}")
    })?;

    if !recovered.is_empty() {
        let count = recovered.len();
        for e in recovered {
            e.into_diagnostic(&handler).emit();
        }
        bail!("{filename}: {count} syntax error(s)");
    }

    Ok(ParseResult { module, source_map })
}
