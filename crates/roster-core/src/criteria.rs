//! Search criteria and the predicate composer.
//!
//! Each composer function maps one optional criteria field to an optional
//! column predicate. Absent fields (including blank strings) compose to `None`,
//! which the query builder elides, so all-absent criteria run unfiltered.
//! The functions are pure over their input and independently callable, which
//! is what lets the same predicates drive different projections.

use roster_db::{
    expr::{ops::BinaryOp, Col},
    traits::Expression as _,
};

use crate::schema::{members, teams};

/// Optional filters for one member search. Immutable once built; reconstructed
/// per call.
///
/// Both age bounds may be present independently. `age_goe > age_loe` is not
/// validated here; it simply selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSearchCriteria {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i64>,
    pub age_loe: Option<i64>,
}

impl MemberSearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i64) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i64) -> Self {
        self.age_loe = Some(age);
        self
    }
}

/// `members.username = ?`; blank input means no constraint.
pub fn username_eq(username: Option<&str>) -> Option<BinaryOp<Col<String>>> {
    username
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| members::USERNAME.eq(s.to_string()))
}

/// `teams.name = ?`; blank input means no constraint.
pub fn team_name_eq(team_name: Option<&str>) -> Option<BinaryOp<Col<String>>> {
    team_name
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| teams::NAME.eq(s.to_string()))
}

/// `members.age >= ?`.
pub fn age_goe(age: Option<i64>) -> Option<BinaryOp<Col<i64>>> {
    age.map(|a| members::AGE.gte(a))
}

/// `members.age <= ?`.
pub fn age_loe(age: Option<i64>) -> Option<BinaryOp<Col<i64>>> {
    age.map(|a| members::AGE.lte(a))
}
