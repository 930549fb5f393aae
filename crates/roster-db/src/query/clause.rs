//! Internal representation of query clauses.
//!
//! Most of these types are used internally by the [`super::SelectQuery`]
//! builder and are not part of the public API; [`NullOrder`] is public because
//! callers pass it to `order_by_nulls`.

use rusqlite::types::Value;

pub(crate) type SqlFn = Box<dyn Fn(&mut Vec<Value>) -> String>;

/// A WHERE conjunct represented as a closure that generates SQL and binds parameters.
pub(crate) struct WhereClause {
    pub sql_fn: SqlFn,
}

/// Placement of NULL values in an ordered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrder {
    First,
    Last,
}

/// An ORDER BY clause.
pub(crate) struct OrderClause {
    pub column: String,
    pub desc: bool,
    pub nulls: Option<NullOrder>,
}

/// Join flavor. LEFT keeps base rows whose ON condition finds no match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JoinKind {
    Inner,
    Left,
}

impl JoinKind {
    pub fn sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
        }
    }
}

/// A JOIN clause with its ON conditions (equi-join plus any join-time filters).
pub(crate) struct JoinClause {
    pub kind: JoinKind,
    pub table: &'static str,
    pub on: Vec<SqlFn>,
}
