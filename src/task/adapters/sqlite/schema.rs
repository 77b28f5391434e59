//! Diesel schema for task persistence.

diesel::table! {
    /// Task records submitted for asynchronous completion.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> BigInt,
        /// Client-supplied title.
        title -> Text,
        /// Optional client-supplied description.
        description -> Nullable<Text>,
        /// Legacy completion flag, never written after insert.
        completed -> Bool,
        /// Task lifecycle status.
        status -> Text,
        /// Ingestion timestamp.
        created_at -> TimestamptzSqlite,
    }
}
