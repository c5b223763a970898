/// Primary key type for every table (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// UTC timestamp used for all `created_at`/`updated_at` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
