//! Typed column constants for the roster tables.

use roster_db::define_entity;

define_entity!(
    teams {
        table: "teams",
        columns: {
            ID: i64 => "id",
            NAME: String => "name"
        }
    }
);

define_entity!(
    members {
        table: "members",
        columns: {
            ID: i64 => "id",
            USERNAME: String => "username",
            AGE: i64 => "age",
            TEAM_ID: Option<i64> => "team_id"
        }
    }
);
