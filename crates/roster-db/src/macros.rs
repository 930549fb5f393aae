//! Macros for defining entity schemas.
//!
//! The [`define_entity!`] macro generates column constants for a table,
//! tying database column names to Rust types.

/// Defines a module with typed column constants for a database table.
///
/// This macro generates a public module containing `const` declarations
/// for each column, making it easy to reference columns in queries. Columns
/// are table-qualified, so they stay unambiguous in joined queries.
///
/// # Syntax
///
/// ```ignore
/// define_entity!(
///     members {
///         table: "members",
///         columns: {
///             ID: i64 => "id",
///             USERNAME: String => "username"
///         }
///     }
/// );
/// ```
///
/// This expands to:
///
/// ```ignore
/// pub mod members {
///     pub const TABLE: &str = "members";
///     pub const ID: roster_db::Col<i64> = roster_db::Col::qualified("members", "id");
///     pub const USERNAME: roster_db::Col<String> = roster_db::Col::qualified("members", "username");
/// }
/// ```
///
/// # Usage
///
/// ```ignore
/// use roster_db::{SelectQuery, define_entity, FromRow};
/// use roster_db::traits::Expression as _;
///
/// define_entity!(
///     members {
///         table: "members",
///         columns: {
///             ID: i64 => "id",
///             USERNAME: String => "username"
///         }
///     }
/// );
///
/// SelectQuery::<Member>::from(db, members::TABLE)
///     .filter(members::USERNAME.eq("member1".to_string()));
/// ```
#[macro_export]
macro_rules! define_entity {
    (
        $entity:ident {
            table: $table:literal,
            columns: {
                $($col_name:ident: $col_type:ty => $db_col:literal),* $(,)?
            }
        }
    ) => {
        pub mod $entity {
            use $crate::expr::column::Col;

            pub const TABLE: &str = $table;

            $(
                $crate::define_column!($col_name, $col_type, $table, $db_col);
            )*
        }
    };
}

#[macro_export]
macro_rules! define_column {
    // Optional types
    ($name:ident, Option<$inner:ty>, $table:literal, $db_col:literal) => {
        pub const $name: Col<Option<$inner>> = Col::qualified($table, $db_col);
    };

    // Regular types (fallback)
    ($name:ident, $type:ty, $table:literal, $db_col:literal) => {
        pub const $name: Col<$type> = Col::qualified($table, $db_col);
    };
}
