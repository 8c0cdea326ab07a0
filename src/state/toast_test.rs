use super::*;

#[test]
fn push_assigns_unique_increasing_ids() {
    let mut s = ToastState::default();
    let a = s.error("first");
    let b = s.success("second");
    assert!(b > a);
    assert_eq!(s.toasts.len(), 2);
    assert_eq!(s.toasts[0].message, "first");
    assert_eq!(s.toasts[0].kind, ToastKind::Error);
}

#[test]
fn dismiss_removes_only_the_matching_toast() {
    let mut s = ToastState::default();
    let a = s.info("keep");
    let b = s.error("drop");
    s.dismiss(b);
    assert_eq!(s.toasts.len(), 1);
    assert_eq!(s.toasts[0].id, a);
}

#[test]
fn dismiss_of_unknown_id_is_a_noop() {
    let mut s = ToastState::default();
    s.info("only");
    s.dismiss(999);
    assert_eq!(s.toasts.len(), 1);
}

#[test]
fn ids_stay_unique_after_dismiss() {
    let mut s = ToastState::default();
    let a = s.info("a");
    s.dismiss(a);
    let b = s.info("b");
    assert_ne!(a, b);
}
