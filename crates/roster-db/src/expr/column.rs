//! Represents a typed database column.
//!
//! `Col<T>` ties a column name to a Rust type `T`, enabling compile-time
//! safety when constructing queries. It implements [`Expression`], so it can
//! be used directly in filters.

use std::marker::PhantomData;

use rusqlite::types::Value;

use crate::traits::Expression;

/// A typed reference to a database column.
///
/// The type parameter `T` indicates the expected Rust type when reading this column,
/// though it is not enforced at runtime—ensure your `FromRow` implementation matches.
///
/// Columns may carry a table qualifier (for joins) and a result alias (for
/// projections that read columns from more than one table).
///
/// # Example
///
/// ```rust
/// use roster_db::expr::Col;
/// const NAME: Col<String> = Col::qualified("members", "username");
/// assert_eq!(NAME.as_named("member_name").select_expr(), "members.username AS member_name");
/// ```
#[derive(Clone, Copy)]
pub struct Col<T> {
    pub table: Option<&'static str>,
    pub name: &'static str,
    pub alias: Option<&'static str>,
    _type: PhantomData<T>,
}

impl<T> Col<T> {
    /// Creates a new column reference.
    ///
    /// # Parameters
    ///
    /// - `name`: the actual column name in the database (e.g., `"user_name"`)
    pub const fn new(name: &'static str) -> Self {
        Self {
            table: None,
            name,
            alias: None,
            _type: PhantomData,
        }
    }

    /// Creates a table-qualified column reference (e.g., `members.username`).
    pub const fn qualified(table: &'static str, name: &'static str) -> Self {
        Self {
            table: Some(table),
            name,
            alias: None,
            _type: PhantomData,
        }
    }

    /// Returns a copy of this column carrying a result alias.
    ///
    /// The alias only affects [`Self::select_expr`]; filters and ordering keep
    /// using the qualified column name.
    pub const fn as_named(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// The column name as it appears in WHERE/ORDER BY clauses.
    pub fn qualified_name(&self) -> String {
        match self.table {
            Some(table) => format!("{}.{}", table, self.name),
            None => self.name.to_string(),
        }
    }

    /// Get the select expression for this column
    pub fn select_expr(&self) -> String {
        match self.alias {
            Some(alias) => format!("{} AS {}", self.qualified_name(), alias),
            None => self.qualified_name(),
        }
    }
}

impl<T> Expression for Col<T> {
    fn to_sql(&self, _params: &mut Vec<Value>) -> String {
        self.qualified_name()
    }
}
