//! Named result shapes assembled from the joined tables.
//!
//! Projections are flat DTOs, not persisted entities. Each one pairs a
//! `FromRow` mapping with the aliased select list that produces exactly the
//! columns it reads.

use roster_db::{FromRow, Projection};
use rusqlite::Row;
use serde::Serialize;

use crate::schema::{members, teams};

/// A member with its team's columns. The team side is `Option` so the same
/// shape serves outer joins, where unmatched rows carry NULL team columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberTeamRow {
    pub member_id: i64,
    pub username: String,
    pub age: i64,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl FromRow for MemberTeamRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            member_id: row.get("member_id")?,
            username: row.get("username")?,
            age: row.get("age")?,
            team_id: row.get("team_id")?,
            team_name: row.get("team_name")?,
        })
    }
}

impl Projection for MemberTeamRow {
    fn select_exprs() -> Vec<String> {
        vec![
            members::ID.as_named("member_id").select_expr(),
            members::USERNAME.as_named("username").select_expr(),
            members::AGE.as_named("age").select_expr(),
            teams::ID.as_named("team_id").select_expr(),
            teams::NAME.as_named("team_name").select_expr(),
        ]
    }
}

/// Just the member-side columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub username: String,
    pub age: i64,
}

impl FromRow for MemberSummary {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            username: row.get("username")?,
            age: row.get("age")?,
        })
    }
}

impl Projection for MemberSummary {
    fn select_exprs() -> Vec<String> {
        vec![
            members::USERNAME.as_named("username").select_expr(),
            members::AGE.as_named("age").select_expr(),
        ]
    }
}
