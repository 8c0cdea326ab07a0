use super::*;

#[test]
fn both_fields_are_required() {
    assert_eq!(login_error("", "secret"), Some("Email is required."));
    assert_eq!(login_error("   ", "secret"), Some("Email is required."));
    assert_eq!(login_error("ana@example.com", ""), Some("Password is required."));
}

#[test]
fn filled_credentials_pass() {
    assert_eq!(login_error("ana@example.com", "secret"), None);
}

#[test]
fn passwords_are_not_trimmed() {
    // Leading or trailing spaces may be part of the password.
    assert_eq!(login_error("ana@example.com", " "), None);
}
