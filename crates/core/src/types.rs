/// Server-owned record identifiers are opaque object-id strings (`_id`).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
