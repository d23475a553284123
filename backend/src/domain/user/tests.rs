//! Tests for the user record model.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn record() -> UserRecord {
    UserRecord::new(
        UserId::random(),
        Email::new("ada@example.com").expect("valid email"),
        Username::new("ada").expect("valid username"),
        PasswordHash::new("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA").expect("valid hash"),
    )
}

#[rstest]
#[case("ada@example.com")]
#[case("first.last+tag@mail.example.org")]
#[case("u1@x.com")]
fn email_accepts_addresses(#[case] raw: &str) {
    let email = Email::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), raw);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("plainaddress", UserValidationError::InvalidEmail { value: "plainaddress".to_owned() })]
#[case("a@b", UserValidationError::InvalidEmail { value: "a@b".to_owned() })]
#[case("a b@x.com", UserValidationError::InvalidEmail { value: "a b@x.com".to_owned() })]
#[case("a@@x.com", UserValidationError::InvalidEmail { value: "a@@x.com".to_owned() })]
fn email_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    let err = Email::new(raw).expect_err("invalid email");
    assert_eq!(err, expected);
}

#[rstest]
fn invalid_email_message_names_the_value() {
    let err = Email::new("nope").expect_err("invalid email");
    assert_eq!(err.to_string(), "Invalid email address: nope");
}

#[rstest]
#[case("")]
#[case(" \t ")]
fn username_rejects_blank(#[case] raw: &str) {
    assert_eq!(
        Username::new(raw).expect_err("blank username"),
        UserValidationError::EmptyUsername
    );
}

#[rstest]
fn username_is_stored_verbatim() {
    let username = Username::new(" bob ").expect("non-blank username");
    assert_eq!(username.as_ref(), " bob ");
}

#[rstest]
fn email_deserialisation_validates() {
    let err = serde_json::from_str::<Email>("\"broken\"");
    assert!(err.is_err());
    let ok: Email = serde_json::from_str("\"ok@example.com\"").expect("valid email json");
    assert_eq!(ok.as_ref(), "ok@example.com");
}

#[rstest]
fn password_hash_debug_is_redacted(record: UserRecord) {
    let rendered = format!("{record:?}");
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains("argon2id"));
}

#[rstest]
fn summary_carries_only_public_fields(record: UserRecord) {
    let summary = record.summary();
    assert_eq!(
        summary,
        UserSummary {
            email: "ada@example.com".to_owned(),
            username: "ada".to_owned(),
        }
    );
    let json = serde_json::to_value(&summary).expect("summary serialises");
    assert_eq!(json.as_object().map(|o| o.len()), Some(2));
}

#[rstest]
fn empty_password_hash_is_rejected() {
    assert_eq!(
        PasswordHash::new("").expect_err("empty hash"),
        UserValidationError::EmptyPasswordHash
    );
}
