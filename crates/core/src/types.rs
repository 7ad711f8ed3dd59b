/// Row id. Postgres hands these out from BIGSERIAL primary keys.
pub type DbId = i64;

/// UTC wall-clock time, as stored in timestamptz columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
