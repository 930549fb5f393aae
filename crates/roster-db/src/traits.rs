//! Core traits that power the query builder.
//!
//! These traits define the contract for:
//! - Converting database rows into Rust types (`FromRow`)
//! - Naming flat result shapes with an explicit select list (`Projection`)
//! - Building SQL expressions (`Expression`)

use rusqlite::{types::Value, Row};

use crate::expr::ops::{BinaryOp, ColumnOp, LogicalOp, NullOp};

/// A trait for types that can be converted into SQL expressions.
///
/// This enables ergonomic query construction using operators like `.eq()`, `.gte()`, etc.
/// Implementors include:
/// - [`crate::expr::Col<T>`]: a table column
/// - [`BinaryOp`], [`ColumnOp`], etc.: compound expressions
///
/// When `to_sql` is called, it appends bound parameters to the provided `params` vector
/// and returns the SQL fragment (with `?` placeholders).
pub trait Expression: Sized {
    /// Converts this expression into a SQL string fragment and appends bound parameters.
    ///
    /// # Parameters
    ///
    /// - `params`: A mutable vector to which bound values (e.g., strings, integers) are pushed.
    ///
    /// # Returns
    ///
    /// A SQL string fragment using `?` as placeholders for parameters.
    ///
    /// # Example
    ///
    /// ```rust
    /// use roster_db::expr::Col;
    /// use roster_db::traits::Expression as _;
    ///
    /// let col = Col::<String>::new("username");
    /// let expr = col.eq("member1".to_string());
    /// let mut params = vec![];
    /// let sql = expr.to_sql(&mut params); // sql = "username = ?", params = [Value::Text("member1".into())]
    /// ```
    fn to_sql(&self, params: &mut Vec<Value>) -> String;

    /// Creates a SQL `=` condition.
    fn eq<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, "=", value.into())
    }

    /// Creates a SQL `!=` condition.
    fn ne<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, "!=", value.into())
    }

    /// Creates a SQL `>` condition.
    fn gt<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, ">", value.into())
    }

    /// Creates a SQL `<` condition.
    fn lt<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, "<", value.into())
    }

    /// Creates a SQL `>=` condition.
    fn gte<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, ">=", value.into())
    }

    /// Creates a SQL `<=` condition.
    fn lte<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, "<=", value.into())
    }

    /// Creates a SQL `=` condition against another expression, typically a
    /// column. Used for join ON clauses; binds no parameter.
    fn eq_col<R: Expression>(self, other: R) -> ColumnOp<Self, R> {
        ColumnOp::new(self, "=", other)
    }

    /// Creates a SQL `IS NULL` condition.
    fn null(self) -> NullOp<Self> {
        NullOp::new(self, true)
    }

    /// Creates a SQL `IS NOT NULL` condition.
    fn not_null(self) -> NullOp<Self> {
        NullOp::new(self, false)
    }

    /// Combines two expressions with `AND`.
    fn and<E: Expression>(self, other: E) -> LogicalOp<Self, E> {
        LogicalOp::new(self, other, "AND")
    }

    /// Combines two expressions with `OR`.
    fn or<E: Expression>(self, other: E) -> LogicalOp<Self, E> {
        LogicalOp::new(self, other, "OR")
    }
}

/// A trait for types that can be constructed from a SQLite row.
///
/// This is used by [`crate::SelectQuery::fetch`] and [`crate::SelectQuery::fetch_one`]
/// to map query results.
///
/// # Example
///
/// ```rust
/// use roster_db::FromRow;
/// struct Member {
///     id: i64,
///     username: String
/// }
///
/// impl FromRow for Member {
///     fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
///         Ok(Member {
///             id: row.get("id")?,
///             username: row.get("username")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// A named, flat result shape with a fixed column-to-field mapping.
///
/// A projection pairs a [`FromRow`] implementation with the select expressions
/// that produce exactly the columns it reads, usually aliased so that shapes
/// spanning several joined tables stay unambiguous. Apply it to a query with
/// [`crate::SelectQuery::select_projection`].
pub trait Projection: FromRow {
    /// Select-list expressions, one per field the shape reads.
    fn select_exprs() -> Vec<String>;
}
