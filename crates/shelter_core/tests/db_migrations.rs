use shelter_core::db::migrations::latest_version;
use shelter_core::db::{open_db, open_db_in_memory, DbError, ShelterDb};
use shelter_core::StorageLocation;
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_pets_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(
        table_columns(&conn, "pets"),
        vec![
            ("_id".to_string(), "INTEGER".to_string(), false, None),
            ("name".to_string(), "TEXT".to_string(), true, None),
            ("breed".to_string(), "TEXT".to_string(), false, None),
            ("gender".to_string(), "INTEGER".to_string(), true, None),
            (
                "weight".to_string(),
                "INTEGER".to_string(),
                false,
                Some("0".to_string())
            ),
        ]
    );
}

#[test]
fn pets_table_enforces_not_null_and_default_weight() {
    let conn = open_db_in_memory().unwrap();

    let err = conn
        .execute("INSERT INTO pets (gender) VALUES (1);", [])
        .unwrap_err();
    assert!(err.to_string().contains("NOT NULL"));

    conn.execute("INSERT INTO pets (name, gender) VALUES ('Toto', 1);", [])
        .unwrap();
    let weight: i64 = conn
        .query_row("SELECT weight FROM pets;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(weight, 0);
}

#[test]
fn opening_same_database_twice_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelter.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO pets (name, gender) VALUES ('Toto', 1);", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM pets;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
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
fn lazy_handle_surfaces_open_failure_and_stays_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-parent").join("shelter.db");

    let db = ShelterDb::new(StorageLocation::File(path));
    assert!(matches!(db.readable(), Err(DbError::Sqlite(_))));
    assert!(!db.is_open());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_columns(conn: &Connection, table: &str) -> Vec<(String, String, bool, Option<String>)> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>("name")?,
            row.get::<_, String>("type")?,
            row.get::<_, i64>("notnull")? == 1,
            row.get::<_, Option<String>>("dflt_value")?,
        ))
    })
    .unwrap()
    .collect::<Result<Vec<_>, _>>()
    .unwrap()
}
