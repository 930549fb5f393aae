//! Persisted record types.

use roster_db::FromRow;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A team. Members point at it through `members.team_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

impl FromRow for Team {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

/// A member, optionally attached to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub username: String,
    pub age: i64,
    pub team_id: Option<i64>,
}

impl FromRow for Member {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
            age: row.get("age")?,
            team_id: row.get("team_id")?,
        })
    }
}

/// Insert shape for [`Team`]; the store assigns the id.
#[derive(Debug, Clone, Copy)]
pub struct NewTeam<'a> {
    pub name: &'a str,
}

/// Insert shape for [`Member`]; the store assigns the id.
#[derive(Debug, Clone, Copy)]
pub struct NewMember<'a> {
    pub username: &'a str,
    pub age: i64,
    pub team_id: Option<i64>,
}
