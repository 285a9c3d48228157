use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{
    sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Arguments, FromRow, Pool, Sqlite,
};

use crate::config::AppConfig;

pub mod schema;

pub type DbPool = Pool<Sqlite>;

/// Positional parameter for `run`, `get` and `all`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
    Null,
}

impl SqlValue {
    /// Blank text and NULL do not satisfy a required column.
    pub fn is_blank(&self) -> bool {
        match self {
            SqlValue::Text(s) => s.trim().is_empty(),
            SqlValue::Null => true,
            _ => false,
        }
    }

    pub fn timestamp(ts: DateTime<Utc>) -> Self {
        SqlValue::Text(ts.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

// Lists are kept as a JSON array in a TEXT column
impl From<Vec<String>> for SqlValue {
    fn from(value: Vec<String>) -> Self {
        serde_json::to_string(&value)
            .map(SqlValue::Text)
            .unwrap_or(SqlValue::Null)
    }
}

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy)]
pub struct StoreWrite {
    pub last_id: i64,
    pub rows_affected: u64,
}

/// Builds the shared pool. Nothing connects until the first query.
pub fn connect(config: &AppConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    let in_memory = config.database_url.contains(":memory:");
    let pool = if in_memory {
        // Every connection to :memory: is its own database; keep exactly one alive
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(0)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_lazy_with(options)
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.db_max_connections.max(1))
            .acquire_timeout(Duration::from_secs(10))
            .connect_lazy_with(options)
    };

    Ok(pool)
}

pub async fn init_db(config: &AppConfig) -> Result<DbPool, sqlx::Error> {
    let pool = connect(config)?;
    schema::initialize_schema(&pool).await?;
    Ok(pool)
}

/// Current time truncated to the precision timestamps are stored with.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}

/// Timestamp for a write that follows `previous`; never equal to or older than it.
pub fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = now();
    match previous {
        Some(prev) if now <= prev => prev + chrono::Duration::microseconds(1),
        _ => now,
    }
}

pub async fn run(
    pool: &DbPool,
    sql: &str,
    params: Vec<SqlValue>,
) -> Result<StoreWrite, sqlx::Error> {
    let result = sqlx::query_with(sql, arguments(params))
        .execute(pool)
        .await?;
    Ok(StoreWrite {
        last_id: result.last_insert_rowid(),
        rows_affected: result.rows_affected(),
    })
}

pub async fn get<T>(
    pool: &DbPool,
    sql: &str,
    params: Vec<SqlValue>,
) -> Result<Option<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    sqlx::query_as_with::<_, T, _>(sql, arguments(params))
        .fetch_optional(pool)
        .await
}

pub async fn all<T>(
    pool: &DbPool,
    sql: &str,
    params: Vec<SqlValue>,
) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    sqlx::query_as_with::<_, T, _>(sql, arguments(params))
        .fetch_all(pool)
        .await
}

// One conversion point from `SqlValue` to driver arguments
fn arguments<'q>(params: Vec<SqlValue>) -> SqliteArguments<'q> {
    let mut args = SqliteArguments::default();
    for param in params {
        match param {
            SqlValue::Text(v) => args.add(v),
            SqlValue::Integer(v) => args.add(v),
            SqlValue::Real(v) => args.add(v),
            SqlValue::Bool(v) => args.add(v),
            SqlValue::Null => args.add(Option::<String>::None),
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_and_null_are_blank() {
        assert!(SqlValue::from("   ").is_blank());
        assert!(SqlValue::Null.is_blank());
        assert!(!SqlValue::from(0_i64).is_blank());
        assert!(!SqlValue::from(false).is_blank());
    }

    #[test]
    fn lists_are_stored_as_json_text() {
        let value = SqlValue::from(vec!["Dekorasi".to_string(), "Katering".to_string()]);
        assert_eq!(value, SqlValue::Text(r#"["Dekorasi","Katering"]"#.to_string()));
    }

    #[test]
    fn next_timestamp_moves_past_a_future_previous_value() {
        let future = now() + chrono::Duration::seconds(30);
        let next = next_timestamp(Some(future));
        assert_eq!(next, future + chrono::Duration::microseconds(1));
    }

    #[test]
    fn timestamps_are_stored_with_fixed_precision() {
        let ts = DateTime::parse_from_rfc3339("2026-10-19T08:30:00Z")
            .map(|t| t.with_timezone(&Utc))
            .unwrap();
        assert_eq!(
            SqlValue::timestamp(ts),
            SqlValue::Text("2026-10-19T08:30:00.000000Z".to_string())
        );
    }

    #[tokio::test]
    async fn run_get_and_all_bind_positional_parameters() {
        let cfg = AppConfig::in_memory("/tmp/unused", "secret");
        let pool = connect(&cfg).unwrap();
        run(&pool, "CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)", vec![])
            .await
            .unwrap();

        let hostile = "x'); DROP TABLE t; --";
        let write = run(&pool, "INSERT INTO t (name) VALUES (?)", vec![hostile.into()])
            .await
            .unwrap();
        assert_eq!(write.last_id, 1);
        assert_eq!(write.rows_affected, 1);

        let by_id = "SELECT id, name FROM t WHERE id = ?";
        let row: Option<(i64, String)> = get(&pool, by_id, vec![1_i64.into()]).await.unwrap();
        assert_eq!(row, Some((1, hostile.to_string())));

        let rows: Vec<(i64, String)> = all(&pool, "SELECT id, name FROM t", vec![]).await.unwrap();
        assert_eq!(rows.len(), 1);

        let missing: Option<(i64, String)> = get(&pool, by_id, vec![9_i64.into()]).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn null_and_bool_arguments_round_trip() {
        let cfg = AppConfig::in_memory("/tmp/unused", "secret");
        let pool = connect(&cfg).unwrap();
        run(&pool, "CREATE TABLE f (id INTEGER PRIMARY KEY, note TEXT, active BOOLEAN)", vec![])
            .await
            .unwrap();
        run(
            &pool,
            "INSERT INTO f (note, active) VALUES (?, ?)",
            vec![SqlValue::Null, true.into()],
        )
        .await
        .unwrap();

        let row: Option<(Option<String>, bool)> =
            get(&pool, "SELECT note, active FROM f", vec![]).await.unwrap();
        assert_eq!(row, Some((None, true)));
    }
}
