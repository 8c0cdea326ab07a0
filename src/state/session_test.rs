use super::*;

fn profile(role: &str) -> UserProfile {
    UserProfile {
        name: Some("Ana".to_owned()),
        email: Some("ana@example.com".to_owned()),
        role: Some(role.to_owned()),
    }
}

#[test]
fn default_session_is_unauthenticated() {
    let s = SessionState::default();
    assert!(!s.is_authenticated());
    assert_eq!(s.role(), None);
    assert!(!s.is_view_only());
}

#[test]
fn token_presence_is_the_authentication_signal() {
    let mut s = SessionState::default();
    s.set_token(Some("abc".to_owned()));
    assert!(s.is_authenticated());
    // A token without a cached profile is still authenticated.
    assert_eq!(s.role(), None);
}

#[test]
fn clearing_token_also_clears_cached_profile() {
    let mut s = SessionState::default();
    s.set_token(Some("abc".to_owned()));
    s.set_user(profile("admin"));
    assert_eq!(s.role(), Some(crate::state::roles::Role::Admin));

    s.set_token(None);
    assert!(!s.is_authenticated());
    assert!(s.user.is_none());
}

#[test]
fn clear_resets_everything() {
    let mut s = SessionState::default();
    s.set_token(Some("abc".to_owned()));
    s.set_user(profile("user"));
    s.clear();
    assert_eq!(s, SessionState::default());
}

#[test]
fn role_parses_case_insensitively_from_profile() {
    let mut s = SessionState::default();
    s.set_token(Some("abc".to_owned()));
    s.set_user(profile("VIEWER"));
    assert!(s.is_view_only());
}

#[test]
fn parse_user_discards_malformed_json() {
    assert_eq!(parse_user("not json"), None);
    assert_eq!(parse_user(""), None);

    let parsed = parse_user(r#"{"role":"admin"}"#).expect("valid profile");
    assert_eq!(parsed.role.as_deref(), Some("admin"));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn load_degrades_to_default_without_a_browser() {
    assert_eq!(load(), SessionState::default());
}
