pub mod error;
pub mod expr;
pub mod macros;
pub mod query;
pub mod traits;

pub use error::{DbError, Result};
pub use query::*;
pub use traits::{FromRow, Projection};

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::{Connection, Row};

    use super::*;
    use crate::{
        expr::{ops::BinaryOp, Col},
        traits::Expression as _,
    };

    #[derive(Debug, Clone)]
    struct Book {
        pub id: i64,
        pub title: String,
        pub year: i64,
        pub author_id: Option<i64>,
    }

    impl FromRow for Book {
        fn from_row(row: &Row) -> rusqlite::Result<Self> {
            Ok(Self {
                id: row.get("id")?,
                title: row.get("title")?,
                year: row.get("year")?,
                author_id: row.get("author_id")?,
            })
        }
    }

    #[derive(Debug, Clone)]
    struct BookAuthorRow {
        pub title: String,
        pub author: Option<String>,
    }

    impl FromRow for BookAuthorRow {
        fn from_row(row: &Row) -> rusqlite::Result<Self> {
            Ok(Self {
                title: row.get("title")?,
                author: row.get("author")?,
            })
        }
    }

    impl Projection for BookAuthorRow {
        fn select_exprs() -> Vec<String> {
            vec![
                books::TITLE.as_named("title").select_expr(),
                authors::NAME.as_named("author").select_expr(),
            ]
        }
    }

    define_entity!(
        books {
            table: "books",
            columns: {
                ID: i64 => "id",
                TITLE: String => "title",
                YEAR: i64 => "year",
                AUTHOR_ID: Option<i64> => "author_id"
            }
        }
    );

    define_entity!(
        authors {
            table: "authors",
            columns: {
                ID: i64 => "id",
                NAME: String => "name"
            }
        }
    );

    fn year_goe(year: Option<i64>) -> Option<BinaryOp<Col<i64>>> {
        year.map(|y| books::YEAR.gte(y))
    }

    fn title_eq(title: Option<&str>) -> Option<BinaryOp<Col<String>>> {
        title.map(|t| books::TITLE.eq(t.to_string()))
    }

    fn setup_db() -> Arc<Mutex<Connection>> {
        let conn = Connection::open_in_memory().unwrap();

        conn.execute_batch(
            "CREATE TABLE authors (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            );
            CREATE TABLE books (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                year INTEGER NOT NULL,
                author_id INTEGER REFERENCES authors (id)
            );",
        )
        .unwrap();

        Arc::new(Mutex::new(conn))
    }

    fn seed(db: &Arc<Mutex<Connection>>) {
        for (id, name) in [(1i64, "Ann"), (2, "Bea")] {
            InsertQuery::into(db.clone(), authors::TABLE)
                .set(authors::ID, id)
                .set(authors::NAME, name.to_string())
                .execute()
                .unwrap();
        }

        let rows: [(i64, &str, i64, Option<i64>); 4] = [
            (1, "B1", 1999, Some(1)),
            (2, "B2", 2005, Some(1)),
            (3, "B3", 2010, Some(2)),
            (4, "B4", 2020, None),
        ];
        for (id, title, year, author_id) in rows {
            InsertQuery::into(db.clone(), books::TABLE)
                .set(books::ID, id)
                .set(books::TITLE, title.to_string())
                .set(books::YEAR, year)
                .set(books::AUTHOR_ID, author_id)
                .execute()
                .unwrap();
        }
    }

    #[test]
    fn test_insert_and_select() {
        let db = setup_db();

        let id = InsertQuery::into(db.clone(), books::TABLE)
            .set(books::TITLE, "Discipline and Punish".to_string())
            .set(books::YEAR, 1975i64)
            .set(books::AUTHOR_ID, None::<i64>)
            .execute()
            .unwrap();

        assert!(id > 0);

        let book = SelectQuery::<Book>::from(db, books::TABLE)
            .filter(books::ID.eq(id))
            .fetch_one()
            .unwrap()
            .unwrap();

        assert_eq!(book.title, "Discipline and Punish");
        assert_eq!(book.year, 1975);
        assert_eq!(book.author_id, None);
    }

    #[test]
    fn test_fetch_one_missing_is_none() {
        let db = setup_db();

        let book = SelectQuery::<Book>::from(db, books::TABLE)
            .filter(books::ID.eq(42i64))
            .fetch_one()
            .unwrap();

        assert!(book.is_none());
    }

    #[test]
    fn test_filter_opt_absent_is_unfiltered() {
        let db = setup_db();
        seed(&db);

        let all = SelectQuery::<Book>::from(db, books::TABLE)
            .filter_opt(year_goe(None))
            .filter_opt(title_eq(None))
            .fetch()
            .unwrap();

        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_filter_opt_present_applies_conjunct() {
        let db = setup_db();
        seed(&db);

        let recent = SelectQuery::<Book>::from(db.clone(), books::TABLE)
            .filter_opt(year_goe(Some(2005)))
            .filter_opt(title_eq(None))
            .order_by(books::ID, false)
            .fetch()
            .unwrap();

        let titles: Vec<_> = recent.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["B2", "B3", "B4"]);

        let one = SelectQuery::<Book>::from(db, books::TABLE)
            .filter_opt(year_goe(Some(2005)))
            .filter_opt(title_eq(Some("B3")))
            .fetch()
            .unwrap();

        assert_eq!(one.len(), 1);
        assert_eq!(one[0].id, 3);
    }

    #[test]
    fn test_inner_join_drops_unmatched_base_rows() {
        let db = setup_db();
        seed(&db);

        let rows = SelectQuery::<BookAuthorRow>::from(db, books::TABLE)
            .select_projection()
            .inner_join(authors::TABLE, books::AUTHOR_ID.eq_col(authors::ID))
            .order_by(books::ID, false)
            .fetch()
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.author.is_some()));
    }

    #[test]
    fn test_left_join_on_filter_keeps_base_rows() {
        let db = setup_db();
        seed(&db);

        let rows = SelectQuery::<BookAuthorRow>::from(db, books::TABLE)
            .select_projection()
            .left_join(authors::TABLE, books::AUTHOR_ID.eq_col(authors::ID))
            .on(authors::NAME.eq("Ann".to_string()))
            .order_by(books::ID, false)
            .fetch()
            .unwrap();

        // All base rows retained; only B1/B2 attach an author.
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].author.as_deref(), Some("Ann"));
        assert_eq!(rows[1].author.as_deref(), Some("Ann"));
        assert_eq!(rows[2].author, None);
        assert_eq!(rows[3].author, None);
    }

    #[test]
    fn test_left_join_with_where_on_joined_side_becomes_inner() {
        let db = setup_db();
        seed(&db);

        let rows = SelectQuery::<BookAuthorRow>::from(db, books::TABLE)
            .select_projection()
            .left_join(authors::TABLE, books::AUTHOR_ID.eq_col(authors::ID))
            .filter(authors::NAME.eq("Ann".to_string()))
            .order_by(books::ID, false)
            .fetch()
            .unwrap();

        let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["B1", "B2"]);
    }

    #[test]
    fn test_join_params_bind_before_where_params() {
        let db = setup_db();
        seed(&db);

        // The ON-clause binds "Ann", the WHERE binds 2005; a parameter mixup
        // would surface as a type mismatch or an empty result here.
        let rows = SelectQuery::<BookAuthorRow>::from(db, books::TABLE)
            .select_projection()
            .left_join(authors::TABLE, books::AUTHOR_ID.eq_col(authors::ID))
            .on(authors::NAME.eq("Ann".to_string()))
            .filter(books::YEAR.gte(2005i64))
            .order_by(books::ID, false)
            .fetch()
            .unwrap();

        let got: Vec<_> = rows
            .iter()
            .map(|r| (r.title.as_str(), r.author.as_deref()))
            .collect();
        assert_eq!(got, [("B2", Some("Ann")), ("B3", None), ("B4", None)]);
    }

    #[test]
    fn test_order_by_nulls_last() {
        let db = setup_db();
        seed(&db);

        let rows = SelectQuery::<BookAuthorRow>::from(db, books::TABLE)
            .select_projection()
            .left_join(authors::TABLE, books::AUTHOR_ID.eq_col(authors::ID))
            .order_by_nulls(authors::NAME, false, NullOrder::Last)
            .order_by(books::ID, false)
            .fetch()
            .unwrap();

        let authors: Vec<_> = rows.iter().map(|r| r.author.as_deref()).collect();
        assert_eq!(authors, [Some("Ann"), Some("Ann"), Some("Bea"), None]);
    }

    #[test]
    fn test_count_over_filtered_join() {
        let db = setup_db();
        seed(&db);

        let count = SelectQuery::<BookAuthorRow>::from(db, books::TABLE)
            .select_projection()
            .inner_join(authors::TABLE, books::AUTHOR_ID.eq_col(authors::ID))
            .filter(books::YEAR.gte(2005i64))
            .count()
            .unwrap();

        assert_eq!(count, 2);
    }

    #[test]
    fn test_fetch_page_content_and_total() {
        let db = setup_db();
        seed(&db);

        let page = SelectQuery::<Book>::from(db, books::TABLE)
            .order_by(books::ID, false)
            .fetch_page(PageRequest::new(1, 2))
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.total, 4);
        assert_eq!(page.content[0].id, 2);
        assert_eq!(page.content[1].id, 3);
        assert!(page.has_next());
    }

    #[test]
    fn test_optimized_page_agrees_with_simple() {
        let db = setup_db();
        seed(&db);

        let query = |db: &Arc<Mutex<Connection>>| {
            SelectQuery::<Book>::from(db.clone(), books::TABLE)
                .filter_opt(year_goe(Some(2000)))
                .order_by(books::ID, false)
        };

        for offset in 0..6u32 {
            for limit in 1..5u32 {
                let request = PageRequest::new(offset, limit);
                let simple = query(&db).fetch_page(request).unwrap();
                let optimized = query(&db).fetch_page_optimized(request).unwrap();

                assert_eq!(simple.total, optimized.total, "offset={offset} limit={limit}");
                let simple_ids: Vec<_> = simple.content.iter().map(|b| b.id).collect();
                let optimized_ids: Vec<_> = optimized.content.iter().map(|b| b.id).collect();
                assert_eq!(simple_ids, optimized_ids);

                assert!(optimized.len() as u32 <= limit);
                assert!(u64::from(offset) + optimized.len() as u64 <= optimized.total);
            }
        }
    }
}
