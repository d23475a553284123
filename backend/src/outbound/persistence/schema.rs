//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` and `username` each carry a unique index; insert conflicts on
    /// them surface as unique violations named after the index.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Registered email address.
        email -> Text,
        /// Registered username.
        username -> Text,
        /// Argon2id PHC digest.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
