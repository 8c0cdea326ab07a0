use super::*;

#[test]
fn auth_endpoints_are_recognized() {
    assert!(is_auth_endpoint("/auth/login"));
    assert!(is_auth_endpoint("/auth/register"));
    assert!(!is_auth_endpoint("/auth/me"));
    assert!(!is_auth_endpoint("/patents"));
}

#[test]
fn unauthorized_forces_logout_only_off_the_login_view() {
    assert!(should_force_logout("/patents", "/dashboard"));
    assert!(should_force_logout("/patents/7", "/patent-list"));

    // Already on the login view: nothing to tear down.
    assert!(!should_force_logout("/patents", "/login"));

    // Credential errors on auth endpoints are the caller's to display.
    assert!(!should_force_logout("/auth/login", "/dashboard"));
    assert!(!should_force_logout("/auth/register", "/dashboard"));
}

#[test]
fn server_detail_message_is_extracted() {
    assert_eq!(
        extract_server_message(r#"{"detail":"Patent not found"}"#),
        Some("Patent not found".to_owned())
    );
    assert_eq!(
        extract_server_message(r#"{"message":"bad input"}"#),
        Some("bad input".to_owned())
    );
    // `detail` wins when both are present.
    assert_eq!(
        extract_server_message(r#"{"detail":"a","message":"b"}"#),
        Some("a".to_owned())
    );
}

#[test]
fn non_string_or_malformed_bodies_yield_no_message() {
    assert_eq!(extract_server_message(r#"{"detail":[{"msg":"x"}]}"#), None);
    assert_eq!(extract_server_message("not json"), None);
    assert_eq!(extract_server_message(""), None);
}

#[test]
fn failure_message_falls_back_to_status_line() {
    assert_eq!(
        failure_message("/patents", 500, "oops"),
        "Request to /patents failed (status 500)."
    );
    assert_eq!(
        failure_message("/patents", 422, r#"{"detail":"title required"}"#),
        "title required"
    );
}

#[test]
fn login_body_is_form_encoded() {
    assert_eq!(
        login_form_body("ana@example.com", "p@ss w0rd&x"),
        "grant_type=password&username=ana%40example.com&password=p%40ss%20w0rd%26x"
    );
}

#[test]
fn endpoint_paths_match_the_backend_contract() {
    let s3 = Stage::new(3).expect("valid stage");
    assert_eq!(patent_detail_endpoint(7), "/patents/7");
    assert_eq!(patent_stage_endpoint(7), "/patents/7/etapas");
    assert_eq!(stage_form_endpoint(7), "/patents/stages/7");
    assert_eq!(attachment_url_endpoint(7, s3), "/patents/stages/7/3/url");
}

#[test]
fn search_endpoint_encodes_the_term_and_pins_the_count() {
    assert_eq!(
        search_endpoint("solar panel", 12),
        "/patents/search?termo=solar%20panel&quantidade=3&user_patent_id=12"
    );
}
