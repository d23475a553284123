//! Internal Diesel row structs for the users table.
//!
//! These types never leave the persistence layer; the store adapter converts
//! them into domain records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    #[expect(dead_code, reason = "selected for completeness; not part of the domain record")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating user records.
///
/// `created_at` is filled by the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
}
