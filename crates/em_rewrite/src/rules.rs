//! The two rewrite rules.
//!
//! Each rule comes as a best-effort rewrite that never fails, plus a
//! `check_*` function used by strict mode to reject input the rewrite would
//! silently mangle.

mod anonymous_define;
mod named_define;
mod util;

pub use anonymous_define::{check_anonymous_defines, rewrite_anonymous_defines};
pub use named_define::{check_named_defines, rewrite_named_defines};
