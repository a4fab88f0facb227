/// User primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Form primary keys are PostgreSQL UUIDs.
pub type FormId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
