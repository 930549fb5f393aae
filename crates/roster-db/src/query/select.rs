//! The SELECT query builder implementation.

use std::{
    marker::PhantomData,
    sync::{Arc, Mutex},
};

use rusqlite::{types::Value, Connection, ToSql};
use tracing::trace;

use crate::{
    error::{DbError, Result},
    expr::column::Col,
    query::{
        clause::{JoinClause, JoinKind, NullOrder, OrderClause, SqlFn, WhereClause},
        page::{Page, PageRequest},
    },
    traits::{Expression, FromRow, Projection},
};

/// An ergonomic SQL query builder for SQLite.
///
/// Constructed via [`SelectQuery::from`], then chained with `.filter()`, `.order_by()`, etc.
///
/// # Type Parameters
///
/// - `E`: the entity or projection type (must implement [`FromRow`])
///
/// # Example
///
/// ```rust
/// use roster_db::{SelectQuery, FromRow, define_entity};
/// use roster_db::traits::Expression as _;
/// use std::sync::{Arc, Mutex};
/// use rusqlite::Connection;
///
/// #[derive(Debug)]
/// struct Member {
///     id: i64
/// }
///
/// impl FromRow for Member {
///     fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
///         Ok(Member {
///             id: row.get("id")?
///         })
///     }
/// }
///
/// define_entity!(
///     members {
///         table: "members",
///         columns: {
///             ID: i64 => "id"
///         }
///     }
/// );
///
/// let conn = Connection::open_in_memory().unwrap();
/// conn.execute(
///     "CREATE TABLE members (
///         id INTEGER PRIMARY KEY
///     )",
///     [],
/// ).unwrap();
///
///
/// let db = Arc::new(Mutex::new(conn));
/// let rows = SelectQuery::<Member>::from(db, "members")
///     .filter(members::ID.gt(0))
///     .order_by(members::ID, false)
///     .limit(10)
///     .fetch()
///     .unwrap();
/// ```
pub struct SelectQuery<E> {
    db: Arc<Mutex<Connection>>,
    table: &'static str,
    columns: Vec<String>,
    joins: Vec<JoinClause>,
    wheres: Vec<WhereClause>,
    orders: Vec<OrderClause>,
    limit: Option<u32>,
    offset: Option<u32>,
    _entity: PhantomData<E>,
}

impl<E> SelectQuery<E> {
    /// Starts a new query on the given table.
    ///
    /// # Parameters
    ///
    /// - `db`: shared database connection
    /// - `table`: base table name (e.g., `"members"`)
    pub fn from(db: Arc<Mutex<Connection>>, table: &'static str) -> Self {
        Self {
            db,
            table,
            columns: vec![],
            joins: vec![],
            wheres: vec![],
            orders: vec![],
            limit: None,
            offset: None,
            _entity: PhantomData,
        }
    }

    /// Select specific columns from the table.
    pub fn select<T>(mut self, cols: &[Col<T>]) -> Self {
        self.columns.extend(cols.iter().map(|c| c.select_expr()));
        self
    }

    /// Select the columns of the projection type `E`.
    pub fn select_projection(mut self) -> Self
    where
        E: Projection,
    {
        self.columns = E::select_exprs();
        self
    }

    /// Select all columns from the table
    pub fn select_all(mut self) -> Self {
        self.columns.clear();
        self
    }

    /// Adds an INNER JOIN. Base rows without a matching joined row are dropped.
    pub fn inner_join<Expr: Expression + 'static>(self, table: &'static str, on: Expr) -> Self {
        self.add_join(JoinKind::Inner, table, on)
    }

    /// Adds a LEFT OUTER JOIN. Base rows are kept even when the ON condition
    /// finds no match; the joined columns come back NULL.
    pub fn left_join<Expr: Expression + 'static>(self, table: &'static str, on: Expr) -> Self {
        self.add_join(JoinKind::Left, table, on)
    }

    /// ANDs a join-time filter onto the most recent join's ON clause.
    ///
    /// Unlike [`Self::filter`], a condition placed here does not drop base rows
    /// on a LEFT JOIN; it only controls which joined rows attach.
    pub fn on<Expr: Expression + 'static>(mut self, expr: Expr) -> Self {
        debug_assert!(!self.joins.is_empty(), "on() must follow a join");
        if let Some(join) = self.joins.last_mut() {
            join.on.push(Box::new(move |params| expr.to_sql(params)));
        }
        self
    }

    /// Like [`Self::on`], but `None` leaves the join untouched.
    pub fn on_opt<Expr: Expression + 'static>(self, expr: Option<Expr>) -> Self {
        match expr {
            Some(expr) => self.on(expr),
            None => self,
        }
    }

    /// Adds a WHERE condition. Conditions are ANDed together.
    pub fn filter<Expr: Expression + 'static>(mut self, expr: Expr) -> Self {
        self.wheres.push(WhereClause {
            sql_fn: Box::new(move |params| expr.to_sql(params)),
        });
        self
    }

    /// Adds an optional WHERE condition; `None` adds no constraint.
    ///
    /// This is the seam for criteria with optional fields: build each filter as
    /// an `Option<Expression>` and chain them through here. Absent filters are
    /// elided conjuncts, so a chain where everything is `None` executes
    /// unfiltered.
    pub fn filter_opt<Expr: Expression + 'static>(self, expr: Option<Expr>) -> Self {
        match expr {
            Some(expr) => self.filter(expr),
            None => self,
        }
    }

    /// Adds an ORDER BY clause.
    pub fn order_by<T>(mut self, col: Col<T>, desc: bool) -> Self {
        self.orders.push(OrderClause {
            column: col.qualified_name(),
            desc,
            nulls: None,
        });
        self
    }

    /// Adds an ORDER BY clause with explicit NULL placement.
    pub fn order_by_nulls<T>(mut self, col: Col<T>, desc: bool, nulls: NullOrder) -> Self {
        self.orders.push(OrderClause {
            column: col.qualified_name(),
            desc,
            nulls: Some(nulls),
        });
        self
    }

    /// Limit the number of results
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set query offset
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    fn add_join<Expr: Expression + 'static>(
        mut self,
        kind: JoinKind,
        table: &'static str,
        on: Expr,
    ) -> Self {
        let on: SqlFn = Box::new(move |params| on.to_sql(params));
        self.joins.push(JoinClause {
            kind,
            table,
            on: vec![on],
        });
        self
    }
}

impl<E: FromRow> SelectQuery<E> {
    /// Runs the query and returns all matching rows.
    pub fn fetch(self) -> Result<Vec<E>> {
        self.run_content()
    }

    /// Runs the query and returns the first matching row, if any.
    pub fn fetch_one(self) -> Result<Option<E>> {
        let mut results = self.limit(1).fetch()?;
        Ok(results.pop())
    }

    /// Runs `SELECT COUNT(*)` over the same joins and filters.
    pub fn count(self) -> Result<u64> {
        self.run_count()
    }

    /// Runs the content query for the given window, then an unconditional
    /// count query over the same filtered join.
    pub fn fetch_page(mut self, page: PageRequest) -> Result<Page<E>> {
        self.limit = Some(page.limit);
        self.offset = Some(page.offset);
        let content = self.run_content()?;
        let total = self.run_count()?;
        Ok(Page::new(content, page, total))
    }

    /// Like [`Self::fetch_page`], but skips the count query whenever the
    /// content window already proves the total: a first page shorter than the
    /// limit, or a later non-empty page shorter than the limit (the last
    /// page). Middle pages still count.
    pub fn fetch_page_optimized(mut self, page: PageRequest) -> Result<Page<E>> {
        self.limit = Some(page.limit);
        self.offset = Some(page.offset);
        let content = self.run_content()?;
        let total = match page.total_without_count(content.len()) {
            Some(total) => total,
            None => self.run_count()?,
        };
        Ok(Page::new(content, page, total))
    }

    fn run_content(&self) -> Result<Vec<E>> {
        let (sql, params) = self.build_sql();
        trace!(%sql, "executing select");
        let conn = self.db.lock().map_err(|_| DbError::PoisonError)?;
        let mut stmt = conn.prepare(&sql)?;

        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        let rows = stmt.query_map(params_ref.as_slice(), E::from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<E>>>()?)
    }

    fn run_count(&self) -> Result<u64> {
        let (sql, params) = self.build_count_sql();
        trace!(%sql, "executing count");
        let conn = self.db.lock().map_err(|_| DbError::PoisonError)?;
        let mut stmt = conn.prepare(&sql)?;

        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        Ok(stmt.query_row(params_ref.as_slice(), |row| row.get(0))?)
    }

    fn build_sql(&self) -> (String, Vec<Value>) {
        let mut params = vec![];

        let select = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };

        let mut sql = format!("SELECT {} FROM {}", select, self.table);

        self.push_joins(&mut sql, &mut params);
        self.push_wheres(&mut sql, &mut params);

        if !self.orders.is_empty() {
            sql.push_str(" ORDER BY ");
            let orders = self
                .orders
                .iter()
                .map(|o| {
                    let nulls = match o.nulls {
                        Some(NullOrder::First) => " NULLS FIRST",
                        Some(NullOrder::Last) => " NULLS LAST",
                        None => "",
                    };
                    format!("{} {}{}", o.column, if o.desc { "DESC" } else { "ASC" }, nulls)
                })
                .collect::<Vec<_>>();
            sql.push_str(&orders.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        (sql, params)
    }

    fn build_count_sql(&self) -> (String, Vec<Value>) {
        let mut params = vec![];
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.table);

        self.push_joins(&mut sql, &mut params);
        self.push_wheres(&mut sql, &mut params);

        (sql, params)
    }

    // Joins render before WHERE, so their bound parameters must too.
    fn push_joins(&self, sql: &mut String, params: &mut Vec<Value>) {
        for join in &self.joins {
            let on = join
                .on
                .iter()
                .map(|f| f(params))
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(&format!(" {} JOIN {} ON {}", join.kind.sql(), join.table, on));
        }
    }

    fn push_wheres(&self, sql: &mut String, params: &mut Vec<Value>) {
        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            let conditions = self
                .wheres
                .iter()
                .map(|w| (w.sql_fn)(params))
                .collect::<Vec<_>>();
            sql.push_str(&conditions.join(" AND "));
        }
    }
}
