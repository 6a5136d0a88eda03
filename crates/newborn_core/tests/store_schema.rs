use newborn_core::db::migrations::latest_version;
use newborn_core::db::{open_db, open_db_in_memory, DbError};
use newborn_core::{store_file_name, Store};
use rusqlite::Connection;

#[test]
fn open_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "activities");
    assert_table_exists(&conn, "feedings");
    assert_table_exists(&conn, "sleeps");
}

#[test]
fn version_one_index_set_is_exact() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(
        index_columns(&conn, "activities"),
        vec![vec!["end".to_string()], vec!["start".to_string()]]
    );
    assert_eq!(
        index_columns(&conn, "feedings"),
        vec![
            vec!["end".to_string()],
            vec!["start".to_string()],
            vec!["type".to_string(), "liquid".to_string()],
        ]
    );
    assert_eq!(
        index_columns(&conn, "sleeps"),
        vec![vec!["end".to_string()], vec!["start".to_string()]]
    );
}

#[test]
fn opening_same_store_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(store_file_name());

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "activities");

    // No duplicated schema objects after the second open.
    let activity_indexes: i64 = conn_second
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'index' AND tbl_name = 'activities' AND name NOT LIKE 'sqlite_%';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(activity_indexes, 2);
}

#[test]
fn opening_store_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_facade_opens_named_file_in_directory() {
    let dir = tempfile::tempdir().unwrap();

    let store = Store::open_in_dir(dir.path()).unwrap();
    assert_eq!(schema_version(store.connection()), latest_version());
    drop(store);

    assert!(dir.path().join("newborn-register.db").exists());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

/// Indexed column lists for a table, sorted by index name.
fn index_columns(conn: &Connection, table_name: &str) -> Vec<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'index' AND tbl_name = ?1 AND name NOT LIKE 'sqlite_%'
             ORDER BY name;",
        )
        .unwrap();
    let names: Vec<String> = stmt
        .query_map([table_name], |row| row.get(0))
        .unwrap()
        .map(Result::unwrap)
        .collect();

    names
        .iter()
        .map(|index_name| {
            let mut info = conn
                .prepare(&format!("PRAGMA index_info('{index_name}');"))
                .unwrap();
            info.query_map([], |row| row.get::<_, String>("name"))
                .unwrap()
                .map(Result::unwrap)
                .collect()
        })
        .collect()
}
