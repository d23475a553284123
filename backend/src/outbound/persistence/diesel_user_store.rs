//! PostgreSQL-backed `UserStore` implementation using Diesel ORM.
//!
//! Uniqueness is enforced by the `users_email_key` and `users_username_key`
//! indexes; a unique violation on insert is reported as
//! [`UserStoreError::Duplicate`] naming the offending field.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UniqueField, UserStore, UserStoreError};
use crate::domain::{Email, PasswordHash, UserId, UserRecord, Username};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserStore` port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserStoreError::connection(message)
        }
    }
}

fn unique_field(info: &dyn DatabaseErrorInformation) -> Option<UniqueField> {
    let constraint = info.constraint_name()?;
    if constraint.contains("email") {
        Some(UniqueField::Email)
    } else if constraint.contains("username") {
        Some(UniqueField::Username)
    } else {
        None
    }
}

fn map_diesel_error(error: DieselError) -> UserStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            match unique_field(&*info) {
                Some(field) => UserStoreError::duplicate(field),
                None => UserStoreError::query(format!(
                    "unique violation on unexpected constraint: {}",
                    info.message()
                )),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            UserStoreError::connection(info.message())
        }
        DieselError::DatabaseError(_, info) => UserStoreError::query(info.message()),
        other => UserStoreError::query(other.to_string()),
    }
}

fn row_to_record(row: UserRow) -> Result<UserRecord, UserStoreError> {
    let corrupt = |err: crate::domain::UserValidationError| {
        UserStoreError::query(format!("corrupted user row {}: {err}", row.id))
    };
    let email = Email::new(row.email.clone()).map_err(corrupt)?;
    let username = Username::new(row.username.clone()).map_err(corrupt)?;
    let password_hash = PasswordHash::new(row.password_hash.clone()).map_err(corrupt)?;
    Ok(UserRecord::new(
        UserId::from_uuid(row.id),
        email,
        username,
        password_hash,
    ))
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn insert(&self, record: &UserRecord) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *record.id().as_uuid(),
            email: record.email().as_ref(),
            username: record.username().as_ref(),
            password_hash: record.password_hash().as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn probe(&self) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let _first: Option<uuid::Uuid> = users::table
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    struct ViolationInfo {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for ViolationInfo {
        fn message(&self) -> &str {
            self.message
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ViolationInfo {
                message: "duplicate key value violates unique constraint",
                constraint,
            }),
        )
    }

    fn database_error(kind: DatabaseErrorKind, message: &'static str) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(ViolationInfo {
                message,
                constraint: None,
            }),
        )
    }

    #[rstest]
    #[case(Some("users_email_key"), UserStoreError::duplicate(UniqueField::Email))]
    #[case(Some("users_username_key"), UserStoreError::duplicate(UniqueField::Username))]
    fn unique_violations_name_the_field(
        #[case] constraint: Option<&'static str>,
        #[case] expected: UserStoreError,
    ) {
        assert_eq!(map_diesel_error(unique_violation(constraint)), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("users_pkey"))]
    fn unknown_unique_violations_are_query_errors(#[case] constraint: Option<&'static str>) {
        let err = map_diesel_error(unique_violation(constraint));
        assert!(matches!(err, UserStoreError::Query { .. }));
        assert!(err.to_string().contains("duplicate key value"));
    }

    #[rstest]
    #[case(
        DatabaseErrorKind::Unknown,
        "value too long for type character varying(255)",
        "user store query failed: value too long for type character varying(255)"
    )]
    #[case(
        DatabaseErrorKind::CheckViolation,
        "new row violates check constraint",
        "user store query failed: new row violates check constraint"
    )]
    #[case(
        DatabaseErrorKind::ClosedConnection,
        "server closed the connection unexpectedly",
        "user store connection failed: server closed the connection unexpectedly"
    )]
    fn database_errors_keep_the_server_message(
        #[case] kind: DatabaseErrorKind,
        #[case] message: &'static str,
        #[case] expected: &str,
    ) {
        let err = map_diesel_error(database_error(kind, message));
        assert_eq!(err.to_string(), expected);
        assert_eq!(
            crate::domain::SignupError::persistence(&err).to_string(),
            expected
        );
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, UserStoreError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_diesel_error(DieselError::NotFound);
        assert_eq!(err, UserStoreError::query(DieselError::NotFound.to_string()));
    }

    #[rstest]
    fn row_converts_to_record() {
        let id = Uuid::new_v4();
        let record = row_to_record(UserRow {
            id,
            email: "ada@example.com".to_owned(),
            username: "ada".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            created_at: Utc::now(),
        })
        .expect("valid row");

        assert_eq!(record.id().as_uuid(), &id);
        assert_eq!(record.email().as_ref(), "ada@example.com");
        assert_eq!(record.username().as_ref(), "ada");
    }

    #[rstest]
    fn corrupted_row_is_a_query_error() {
        let err = row_to_record(UserRow {
            id: Uuid::new_v4(),
            email: "not-an-email".to_owned(),
            username: "ada".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            created_at: Utc::now(),
        })
        .expect_err("invalid email in row");
        assert!(err.to_string().contains("corrupted user row"));
    }
}
