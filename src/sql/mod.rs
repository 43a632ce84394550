//! SQL generation module.
//!
//! This module provides a type-safe SQL builder that generates dialect-aware
//! SQL with bound parameters. It includes:
//!
//! - [`query`] - SELECT query builder and [`CompiledQuery`]
//! - [`expr`] - Expression AST and builder DSL
//! - [`params`] - Parameter collector; request values only ever enter SQL here
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations

pub mod dialect;
pub mod expr;
pub mod params;
pub mod query;
pub mod token;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, SqlDialect};
pub use expr::{all_of, any_of, col, date_of, lit_str, table_col, BinaryOperator, Expr, ExprExt};
pub use params::{ParamValue, Params};
pub use query::{
    CompiledQuery, Join, LimitOffset, OrderByExpr, Query, QueryBuildError, SelectExpr, SortDir,
    TableRef,
};
pub use token::{Token, TokenStream};
