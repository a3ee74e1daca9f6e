//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations/` exactly. When the DDL
//! changes, regenerate with `diesel print-schema` or update by hand.

diesel::table! {
    /// Registered users. `email` carries a unique index.
    users (id) {
        id -> Int8,
        email -> Varchar,
        name -> Varchar,
        /// bcrypt hash, never the plaintext.
        password -> Varchar,
    }
}

diesel::table! {
    /// Events that users can attend.
    events (id) {
        id -> Int8,
        owner_id -> Int8,
        name -> Varchar,
        description -> Text,
        date -> Varchar,
        location -> Varchar,
    }
}

diesel::table! {
    /// Membership rows. Unique on `(event_id, user_id)`; both columns cascade
    /// on delete of the referenced row.
    attendees (id) {
        id -> Int8,
        event_id -> Int8,
        user_id -> Int8,
    }
}

diesel::joinable!(attendees -> events (event_id));
diesel::joinable!(attendees -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(attendees, events, users);
