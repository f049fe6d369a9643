//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique login name.
        username -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Jokes, each owned by the user who wrote it.
    jokes (id) {
        id -> Uuid,
        jokester_id -> Uuid,
        name -> Text,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(jokes -> users (jokester_id));
diesel::allow_tables_to_appear_in_same_query!(users, jokes);
