//! Building blocks shared by the dialect implementations.

use super::super::token::{Token, TokenStream};

// =============================================================================
// Quoting
// =============================================================================

/// `"ident"`, doubling embedded quotes. SQLite, Postgres.
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// `` `ident` ``, doubling embedded backticks. MySQL.
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// `'text'` with `''` for an embedded quote.
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Like [`quote_string_single`], also escaping backslashes. MySQL.
pub fn quote_string_backslash(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "''"))
}

// =============================================================================
// Placeholders
// =============================================================================

/// `?NNN`. SQLite.
pub fn placeholder_numbered_question(n: usize) -> String {
    format!("?{n}")
}

/// `$N`. Postgres.
pub fn placeholder_dollar(n: usize) -> String {
    format!("${n}")
}

/// Bare `?`. MySQL.
pub fn placeholder_question(_n: usize) -> String {
    "?".to_string()
}

// =============================================================================
// Pagination
// =============================================================================

/// Pagination counts above `i64::MAX` clamp to it; a wrapped negative
/// OFFSET would read as zero.
fn count_literal(n: u64) -> Token {
    Token::LitInt(i64::try_from(n).unwrap_or(i64::MAX))
}

/// `LIMIT n OFFSET m`, either part optional.
pub fn emit_limit_offset_standard(limit: Option<u64>, offset: Option<u64>) -> TokenStream {
    let mut ts = TokenStream::new();

    if let Some(lim) = limit {
        ts.push(Token::Limit).space().push(count_literal(lim));
    }

    if let Some(off) = offset {
        if limit.is_some() {
            ts.space();
        }
        ts.push(Token::Offset).space().push(count_literal(off));
    }

    ts
}

/// SQLite rejects OFFSET without LIMIT; `LIMIT -1` means unbounded.
pub fn emit_limit_offset_sqlite(limit: Option<u64>, offset: Option<u64>) -> TokenStream {
    match (limit, offset) {
        (None, Some(off)) => {
            let mut ts = TokenStream::new();
            ts.push(Token::Limit)
                .space()
                .push(Token::LitInt(-1))
                .space()
                .push(Token::Offset)
                .space()
                .push(count_literal(off));
            ts
        }
        _ => emit_limit_offset_standard(limit, offset),
    }
}
