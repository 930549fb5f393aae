//! The query builder.
//!
//! This module provides a strongly-typed interface for constructing SQL queries
//! without manually concatenating strings.
//!
//! # Overview
//!
//! - [`SelectQuery`] — Builds `SELECT` statements with support for projections,
//!   structured joins (with join-time ON filters), optional filters, ordering
//!   with NULL placement, limits/offsets, and paged fetches.
//! - [`InsertQuery`] — Builds single-row `INSERT INTO` statements from
//!   column-value pairs.
//!
//! Each builder supports method chaining and produces a final SQL string and
//! bound parameter list executed through `rusqlite`.
//!
//! # Example
//!
//! ```ignore
//! use roster_db::{PageRequest, SelectQuery};
//!
//! let page = SelectQuery::<MemberTeamRow>::from(db, "members")
//!     .select_projection()
//!     .inner_join("teams", members::TEAM_ID.eq_col(teams::ID))
//!     .filter_opt(age_goe)
//!     .filter_opt(age_loe)
//!     .order_by(members::ID, false)
//!     .fetch_page_optimized(PageRequest::new(0, 20))?;
//! ```
//!
//! # Submodules
//!
//! - [`clause`] — Internal clause types shared between builders.
//! - [`page`] — [`Page`] and [`PageRequest`].
//! - [`select`] — Implementation of [`SelectQuery`].
//! - [`insert`] — Implementation of [`InsertQuery`].

pub mod clause;
pub mod insert;
pub mod page;
pub mod select;

pub use clause::NullOrder;
pub use insert::InsertQuery;
pub use page::{Page, PageRequest};
pub use select::SelectQuery;
