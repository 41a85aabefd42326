//! Rewrites legacy AMD module files into ES modules.
//!
//! The rewrite is purely textual and dispatched on the file id:
//!
//! - `*sapl-mode.js`: every `define("name", [deps], function(args) {` header
//!   is lifted into one `import arg from dep;` per dependency.
//! - `*xtext-codemirror.js`: wrapper headers and their `return X; });`
//!   closings are dropped, the editor context is renamed, and a fixed set of
//!   imports and exports is added around the body.
//! - anything else is returned unchanged.
//!
//! No parsing happens here; malformed input yields best-effort output unless
//! strict mode is requested.

pub mod error;
pub mod header;
pub mod rules;
pub mod transform;

pub use error::{Result, RewriteError};
pub use header::{scan_named_defines, DefineHeader};
pub use transform::{transform, transform_with};
