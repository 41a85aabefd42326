use em_ast::{RewriteOptions, RewriteRule, TransformedUnit};
use tracing::info;

use crate::error::Result;
use crate::rules;

/// Rewrite a file with the default options.
///
/// Never fails: files that match no rule come back byte-for-byte unchanged,
/// and matching files are rewritten best-effort.
pub fn transform(id: &str, code: &str) -> TransformedUnit {
    let rule = RewriteOptions::default().rule_for(id);
    apply(rule, id, code)
}

/// Rewrite a file with explicit options.
///
/// Only strict mode can produce an error; it checks the input before any
/// rewriting happens.
pub fn transform_with(id: &str, code: &str, options: &RewriteOptions) -> Result<TransformedUnit> {
    let rule = options.rule_for(id);

    if options.strict {
        match rule {
            RewriteRule::NamedDefine => rules::check_named_defines(code)?,
            RewriteRule::AnonymousDefine => rules::check_anonymous_defines(code)?,
            RewriteRule::Identity => {}
        }
    }

    Ok(apply(rule, id, code))
}

fn apply(rule: RewriteRule, id: &str, code: &str) -> TransformedUnit {
    let code = match rule {
        RewriteRule::NamedDefine => {
            info!(id, %rule, "transforming sapl-mode module");
            rules::rewrite_named_defines(code)
        }
        RewriteRule::AnonymousDefine => {
            info!(id, %rule, "transforming xtext-codemirror bundle");
            rules::rewrite_anonymous_defines(code)
        }
        RewriteRule::Identity => code.to_string(),
    };

    TransformedUnit { rule, code }
}
