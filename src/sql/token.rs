//! SQL tokens - the atomic units of generated SQL.
//!
//! A token knows nothing about the dialect until it is serialized; quoting,
//! placeholder syntax and the concat operator are all resolved then.

use super::dialect::{Dialect, SqlDialect};

/// One element of a report query.
///
/// Adding a variant forces every `serialize` arm to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    From,
    Where,
    And,
    Or,
    As,
    LeftJoin,
    On,
    OrderBy,
    Asc,
    Desc,
    Limit,
    Offset,
    Between,
    Like,
    Escape,

    // === Punctuation ===
    Comma,
    Dot,
    LParen,
    RParen,

    // === Operators ===
    Eq,
    Lte,
    Gte,
    Concat,

    // === Layout ===
    Space,
    Newline,
    Indent(usize),

    // === Dynamic Content ===
    /// Table, column or alias name.
    Ident(String),
    /// Integer literal (pagination only).
    LitInt(i64),
    /// String literal from a static descriptor.
    LitString(String),
    /// Bound parameter slot, 1-based. The value never reaches the SQL text.
    Placeholder(usize),
    /// Function name, rendered upper-case.
    FunctionName(String),
}

impl Token {
    pub fn serialize(&self, dialect: Dialect) -> String {
        match self {
            Token::Select => "SELECT".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::And => "AND".into(),
            Token::Or => "OR".into(),
            Token::As => "AS".into(),
            Token::LeftJoin => "LEFT JOIN".into(),
            Token::On => "ON".into(),
            Token::OrderBy => "ORDER BY".into(),
            Token::Asc => "ASC".into(),
            Token::Desc => "DESC".into(),
            Token::Limit => "LIMIT".into(),
            Token::Offset => "OFFSET".into(),
            Token::Between => "BETWEEN".into(),
            Token::Like => "LIKE".into(),
            Token::Escape => "ESCAPE".into(),

            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            Token::Eq => "=".into(),
            Token::Lte => "<=".into(),
            Token::Gte => ">=".into(),
            Token::Concat => dialect.concat_operator().into(),

            Token::Space => " ".into(),
            Token::Newline => "\n".into(),
            Token::Indent(n) => "  ".repeat(*n),

            Token::Ident(name) => dialect.quote_identifier(name),
            Token::LitInt(n) => n.to_string(),
            Token::LitString(s) => dialect.quote_string(s),
            Token::Placeholder(n) => dialect.placeholder(*n),
            Token::FunctionName(name) => name.to_uppercase(),
        }
    }
}

/// An ordered run of tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Placeholder slots in order of appearance.
    pub fn placeholders(&self) -> Vec<usize> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Placeholder(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    pub fn serialize(&self, dialect: Dialect) -> String {
        self.tokens.iter().map(|t| t.serialize(dialect)).collect()
    }

    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn newline(&mut self) -> &mut Self {
        self.push(Token::Newline)
    }
    pub fn indent(&mut self, n: usize) -> &mut Self {
        self.push(Token::Indent(n))
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}
