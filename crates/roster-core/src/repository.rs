//! Repository facades over the query builder.
//!
//! One repository call is one logical read (or one single-row write); storage
//! failures propagate unchanged and empty results are ordinary values, never
//! errors.

use std::sync::{Arc, Mutex};

use roster_db::{InsertQuery, Page, PageRequest, Projection, SelectQuery};
use rusqlite::Connection;
use tracing::debug;

use crate::{
    criteria::{self, MemberSearchCriteria},
    error::RosterResult,
    model::{Member, NewMember, NewTeam, Team},
    projection::{MemberSummary, MemberTeamRow},
    schema::{members, teams},
};
use roster_db::traits::Expression as _;

/// Team persistence and lookup.
pub struct TeamRepository {
    db: Arc<Mutex<Connection>>,
}

impl TeamRepository {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }

    pub fn save(&self, team: &NewTeam) -> RosterResult<i64> {
        let id = InsertQuery::into(self.db.clone(), teams::TABLE)
            .set(teams::NAME, team.name.to_string())
            .execute()?;
        Ok(id)
    }

    pub fn find_by_id(&self, id: i64) -> RosterResult<Option<Team>> {
        let team = SelectQuery::<Team>::from(self.db.clone(), teams::TABLE)
            .filter(teams::ID.eq(id))
            .fetch_one()?;
        Ok(team)
    }

    pub fn find_all(&self) -> RosterResult<Vec<Team>> {
        let all = SelectQuery::<Team>::from(self.db.clone(), teams::TABLE)
            .order_by(teams::ID, false)
            .fetch()?;
        Ok(all)
    }
}

/// Member persistence, lookup, and criteria-driven search.
pub struct MemberRepository {
    db: Arc<Mutex<Connection>>,
}

impl MemberRepository {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }

    pub fn save(&self, member: &NewMember) -> RosterResult<i64> {
        let id = InsertQuery::into(self.db.clone(), members::TABLE)
            .set(members::USERNAME, member.username.to_string())
            .set(members::AGE, member.age)
            .set(members::TEAM_ID, member.team_id)
            .execute()?;
        Ok(id)
    }

    /// A missing id is an ordinary absent result, not an error.
    pub fn find_by_id(&self, id: i64) -> RosterResult<Option<Member>> {
        let member = SelectQuery::<Member>::from(self.db.clone(), members::TABLE)
            .filter(members::ID.eq(id))
            .fetch_one()?;
        Ok(member)
    }

    pub fn find_all(&self) -> RosterResult<Vec<Member>> {
        let all = SelectQuery::<Member>::from(self.db.clone(), members::TABLE)
            .order_by(members::ID, false)
            .fetch()?;
        Ok(all)
    }

    pub fn find_by_username(&self, username: &str) -> RosterResult<Vec<Member>> {
        let found = SelectQuery::<Member>::from(self.db.clone(), members::TABLE)
            .filter(members::USERNAME.eq(username.to_string()))
            .order_by(members::ID, false)
            .fetch()?;
        Ok(found)
    }

    /// Searches the member-team join with every optional predicate applied.
    pub fn search(&self, criteria: &MemberSearchCriteria) -> RosterResult<Vec<MemberTeamRow>> {
        debug!(?criteria, "searching members");
        let rows = self.search_query::<MemberTeamRow>(criteria).fetch()?;
        Ok(rows)
    }

    /// Same predicates, different projection.
    pub fn search_summaries(
        &self,
        criteria: &MemberSearchCriteria,
    ) -> RosterResult<Vec<MemberSummary>> {
        debug!(?criteria, "searching member summaries");
        let rows = self.search_query::<MemberSummary>(criteria).fetch()?;
        Ok(rows)
    }

    /// Paged search that always issues both the content and the count query.
    pub fn search_page_simple(
        &self,
        criteria: &MemberSearchCriteria,
        page: PageRequest,
    ) -> RosterResult<Page<MemberTeamRow>> {
        debug!(?criteria, ?page, "paged member search (simple count)");
        let result = self
            .search_query::<MemberTeamRow>(criteria)
            .fetch_page(page)?;
        Ok(result)
    }

    /// Paged search that skips the count query when the content window already
    /// proves the total (first page short of the limit, or the last page).
    pub fn search_page(
        &self,
        criteria: &MemberSearchCriteria,
        page: PageRequest,
    ) -> RosterResult<Page<MemberTeamRow>> {
        debug!(?criteria, ?page, "paged member search");
        let result = self
            .search_query::<MemberTeamRow>(criteria)
            .fetch_page_optimized(page)?;
        Ok(result)
    }

    /// Lists every member with team columns attached through a LEFT JOIN,
    /// optionally constraining the joined side at join time.
    ///
    /// The team-name condition lives in the ON clause, so members of other
    /// teams (or of no team) are retained with NULL team columns. Putting the
    /// same condition in the WHERE clause instead would drop those rows; use
    /// [`Self::search`] with `criteria.team_name` for that cardinality.
    pub fn list_with_team(&self, team_name: Option<&str>) -> RosterResult<Vec<MemberTeamRow>> {
        let rows = SelectQuery::<MemberTeamRow>::from(self.db.clone(), members::TABLE)
            .select_projection()
            .left_join(teams::TABLE, members::TEAM_ID.eq_col(teams::ID))
            .on_opt(criteria::team_name_eq(team_name))
            .order_by(members::ID, false)
            .fetch()?;
        Ok(rows)
    }

    fn search_query<P: Projection>(&self, criteria: &MemberSearchCriteria) -> SelectQuery<P> {
        SelectQuery::<P>::from(self.db.clone(), members::TABLE)
            .select_projection()
            .inner_join(teams::TABLE, members::TEAM_ID.eq_col(teams::ID))
            .filter_opt(criteria::username_eq(criteria.username.as_deref()))
            .filter_opt(criteria::team_name_eq(criteria.team_name.as_deref()))
            .filter_opt(criteria::age_goe(criteria.age_goe))
            .filter_opt(criteria::age_loe(criteria.age_loe))
            .order_by(members::ID, false)
    }
}
