//! MySQL SQL dialect.
//!
//! MySQL differences from ANSI:
//! - Backtick identifier quoting (`` `name` ``)
//! - Backslash is an escape inside string literals
//! - Positional `?` parameters only
//! - `||` is logical OR by default (use CONCAT())

use super::helpers;
use super::SqlDialect;

/// MySQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_backslash(s)
    }

    fn placeholder(&self, n: usize) -> String {
        helpers::placeholder_question(n)
    }

    fn numbered_placeholders(&self) -> bool {
        false
    }

    // Uses default emit_limit_offset (LIMIT ... OFFSET ...)

    fn supports_concat_operator(&self) -> bool {
        // MySQL || is OR by default, use CONCAT() instead
        false
    }
}
