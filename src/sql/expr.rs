//! Expression AST for report queries.
//!
//! There is no raw-SQL variant, and no conversion from `&str`: request
//! values enter an expression only as [`Expr::Param`] slots handed out by
//! [`crate::sql::params::Params::bind`]. Static descriptor text goes through
//! [`lit_str`], which the dialect quotes.

use super::dialect::{Dialect, SqlDialect};
use super::token::{Token, TokenStream};

// =============================================================================
// Expression AST
// =============================================================================

/// A SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference: optional_table.column
    Column {
        table: Option<String>,
        column: String,
    },

    /// Quoted string literal from a static descriptor.
    Text(String),

    /// Bound parameter slot (1-based).
    Param(usize),

    /// Binary operation: left op right
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },

    /// Function call: NAME(args...)
    Function { name: String, args: Vec<Expr> },

    /// Inclusive range: expr BETWEEN low AND high
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
    },

    /// expr LIKE pattern ESCAPE 'c'
    LikeEscape {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: char,
    },

    /// Parenthesized expression
    Paren(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    Lte,
    Gte,
    And,
    Or,
    Concat,
}

impl BinaryOperator {
    fn token(self) -> Token {
        match self {
            BinaryOperator::Eq => Token::Eq,
            BinaryOperator::Lte => Token::Lte,
            BinaryOperator::Gte => Token::Gte,
            BinaryOperator::And => Token::And,
            BinaryOperator::Or => Token::Or,
            BinaryOperator::Concat => Token::Concat,
        }
    }
}

// =============================================================================
// Expression to Tokens
// =============================================================================

impl Expr {
    pub fn to_tokens_for_dialect(&self, dialect: Dialect) -> TokenStream {
        let mut ts = TokenStream::new();

        match self {
            Expr::Column { table, column } => {
                if let Some(t) = table {
                    ts.push(Token::Ident(t.clone())).push(Token::Dot);
                }
                ts.push(Token::Ident(column.clone()));
            }

            Expr::Text(s) => {
                ts.push(Token::LitString(s.clone()));
            }

            Expr::Param(n) => {
                ts.push(Token::Placeholder(*n));
            }

            // MySQL reads `||` as OR, so concatenation becomes CONCAT(a, b) there.
            Expr::BinaryOp {
                left,
                op: BinaryOperator::Concat,
                right,
            } if !dialect.supports_concat_operator() => {
                ts.push(Token::FunctionName("CONCAT".into())).lparen();
                ts.append(&left.to_tokens_for_dialect(dialect));
                ts.comma().space();
                ts.append(&right.to_tokens_for_dialect(dialect));
                ts.rparen();
            }

            Expr::BinaryOp { left, op, right } => {
                ts.append(&left.to_tokens_for_dialect(dialect));
                ts.space().push(op.token()).space();
                ts.append(&right.to_tokens_for_dialect(dialect));
            }

            Expr::Function { name, args } => {
                ts.push(Token::FunctionName(name.clone())).lparen();
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        ts.comma().space();
                    }
                    ts.append(&arg.to_tokens_for_dialect(dialect));
                }
                ts.rparen();
            }

            Expr::Between { expr, low, high } => {
                ts.append(&expr.to_tokens_for_dialect(dialect));
                ts.space().push(Token::Between).space();
                ts.append(&low.to_tokens_for_dialect(dialect));
                ts.space().push(Token::And).space();
                ts.append(&high.to_tokens_for_dialect(dialect));
            }

            Expr::LikeEscape {
                expr,
                pattern,
                escape_char,
            } => {
                ts.append(&expr.to_tokens_for_dialect(dialect));
                ts.space().push(Token::Like).space();
                ts.append(&pattern.to_tokens_for_dialect(dialect));
                ts.space()
                    .push(Token::Escape)
                    .space()
                    .push(Token::LitString(escape_char.to_string()));
            }

            Expr::Paren(inner) => {
                ts.lparen();
                ts.append(&inner.to_tokens_for_dialect(dialect));
                ts.rparen();
            }
        }

        ts
    }

    /// Serialize to a SQL fragment for the given dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens_for_dialect(dialect).serialize(dialect)
    }
}

// =============================================================================
// Constructors
// =============================================================================

pub fn col(name: &str) -> Expr {
    Expr::Column {
        table: None,
        column: name.into(),
    }
}

/// `alias.column`
pub fn table_col(table: &str, column: &str) -> Expr {
    Expr::Column {
        table: Some(table.into()),
        column: column.into(),
    }
}

/// String literal for static descriptor text. Request values go through
/// [`crate::sql::params::Params::bind`].
pub fn lit_str(s: &str) -> Expr {
    Expr::Text(s.into())
}

/// DATE(expr), the date part of a datetime column.
pub fn date_of(expr: Expr) -> Expr {
    Expr::Function {
        name: "DATE".into(),
        args: vec![expr],
    }
}

/// OR of the conditions, parenthesised; `None` for an empty list.
pub fn any_of(conditions: Vec<Expr>) -> Option<Expr> {
    let mut iter = conditions.into_iter();
    let first = iter.next()?;
    let joined = iter.fold(first, |acc, c| acc.or(c));
    Some(Expr::Paren(Box::new(joined)))
}

/// AND of the conditions; `None` for an empty list.
pub fn all_of(conditions: Vec<Expr>) -> Option<Expr> {
    let mut iter = conditions.into_iter();
    let first = iter.next()?;
    Some(iter.fold(first, |acc, c| acc.and(c)))
}

// =============================================================================
// Expression Builder Trait
// =============================================================================

/// Fluent builders over [`Expr`].
pub trait ExprExt: Sized {
    fn into_expr(self) -> Expr;

    fn eq(self, other: Expr) -> Expr {
        binary(self.into_expr(), BinaryOperator::Eq, other)
    }

    fn gte(self, other: Expr) -> Expr {
        binary(self.into_expr(), BinaryOperator::Gte, other)
    }

    fn lte(self, other: Expr) -> Expr {
        binary(self.into_expr(), BinaryOperator::Lte, other)
    }

    fn and(self, other: Expr) -> Expr {
        binary(self.into_expr(), BinaryOperator::And, other)
    }

    fn or(self, other: Expr) -> Expr {
        binary(self.into_expr(), BinaryOperator::Or, other)
    }

    fn concat(self, other: Expr) -> Expr {
        binary(self.into_expr(), BinaryOperator::Concat, other)
    }

    fn between(self, low: Expr, high: Expr) -> Expr {
        Expr::Between {
            expr: Box::new(self.into_expr()),
            low: Box::new(low),
            high: Box::new(high),
        }
    }

    /// LIKE with an explicit escape character, so `%` and `_` in the bound
    /// pattern can be matched literally.
    fn like_escape(self, pattern: Expr, escape_char: char) -> Expr {
        Expr::LikeEscape {
            expr: Box::new(self.into_expr()),
            pattern: Box::new(pattern),
            escape_char,
        }
    }
}

fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::BinaryOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

impl ExprExt for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}
