use super::*;

#[test]
fn plausible_emails_pass() {
    assert!(is_plausible_email("ana@example.com"));
    assert!(is_plausible_email("a.b+c@sub.example.org"));
}

#[test]
fn implausible_emails_fail() {
    assert!(!is_plausible_email("no-at-sign"));
    assert!(!is_plausible_email("@example.com"));
    assert!(!is_plausible_email("ana@nodot"));
    assert!(!is_plausible_email("ana@.com"));
    assert!(!is_plausible_email("ana@example."));
}

#[test]
fn name_email_and_password_are_all_checked() {
    assert_eq!(
        registration_error("", "ana@example.com", "secret1"),
        Some("Name is required.")
    );
    assert_eq!(
        registration_error("Ana", "bad-email", "secret1"),
        Some("Enter a valid email address.")
    );
    assert_eq!(
        registration_error("Ana", "ana@example.com", "12345"),
        Some("Password must be at least 6 characters.")
    );
    assert_eq!(registration_error("Ana", "ana@example.com", "123456"), None);
}
