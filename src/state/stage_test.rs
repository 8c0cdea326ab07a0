use super::*;

fn stage(i: u8) -> Stage {
    Stage::new(i).expect("valid stage index")
}

// =============================================================
// Stage bounds
// =============================================================

#[test]
fn stage_new_accepts_only_zero_through_five() {
    for i in 0..=5u8 {
        assert!(Stage::new(i).is_some(), "stage {i} should be valid");
    }
    assert!(Stage::new(6).is_none());
    assert!(Stage::new(255).is_none());
}

#[test]
fn stage_from_record_rejects_negative_and_out_of_range() {
    assert_eq!(Stage::from_record(0), Some(Stage::FIRST));
    assert_eq!(Stage::from_record(5), Some(Stage::LAST));
    assert_eq!(Stage::from_record(-1), None);
    assert_eq!(Stage::from_record(6), None);
    assert_eq!(Stage::from_record(i64::MAX), None);
}

#[test]
fn stage_all_is_in_workflow_order() {
    let indices: Vec<u8> = Stage::ALL.iter().map(|s| s.index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn stage_next_stops_at_grant() {
    assert_eq!(stage(0).next(), Some(stage(1)));
    assert_eq!(stage(4).next(), Some(stage(5)));
    assert_eq!(Stage::LAST.next(), None);
}

// =============================================================
// Finalize
// =============================================================

#[test]
fn finalize_advances_only_from_current_stage() {
    let m = StageMachine::new(stage(2));
    let next = m.apply(StageAction::Finalize { at: stage(2) }).expect("advance");
    assert_eq!(next.current(), stage(3));
}

#[test]
fn finalize_at_non_current_stage_is_rejected() {
    let m = StageMachine::new(stage(3));
    assert_eq!(
        m.apply(StageAction::Finalize { at: stage(2) }),
        Err(Rejected::NotCurrentStage { at: stage(2), current: stage(3) })
    );
    assert_eq!(
        m.apply(StageAction::Finalize { at: stage(4) }),
        Err(Rejected::NotCurrentStage { at: stage(4), current: stage(3) })
    );
}

#[test]
fn finalize_after_grant_is_rejected() {
    let m = StageMachine::new(Stage::LAST);
    assert_eq!(
        m.apply(StageAction::Finalize { at: Stage::LAST }),
        Err(Rejected::AlreadyGranted)
    );
}

#[test]
fn finalize_reaching_grant_marks_machine_granted() {
    let m = StageMachine::new(stage(4));
    let next = m.apply(StageAction::Finalize { at: stage(4) }).expect("advance");
    assert!(next.is_granted());
}

#[test]
fn finalize_keeps_edit_flag_on_other_stages() {
    let m = StageMachine::new(stage(3));
    let m = m.apply(StageAction::EnterEdit { at: stage(2) }).expect("edit");
    // Finalizing the current stage keeps an unrelated edit flag.
    let m = m.apply(StageAction::Finalize { at: stage(3) }).expect("advance");
    assert_eq!(m.edit_stage(), Some(stage(2)));
}

// =============================================================
// Editability
// =============================================================

#[test]
fn registration_is_never_editable() {
    // Even when registration is the current stage, and even in edit mode
    // attempts, stage 0 stays read-only.
    let m = StageMachine::new(Stage::FIRST);
    assert!(!m.is_editable(Stage::FIRST, false));

    let m = StageMachine::new(stage(3));
    assert_eq!(
        m.apply(StageAction::EnterEdit { at: Stage::FIRST }),
        Err(Rejected::RegistrationImmutable)
    );
    assert!(!m.is_editable(Stage::FIRST, false));
}

#[test]
fn current_stage_is_editable() {
    let m = StageMachine::new(stage(2));
    assert!(m.is_editable(stage(2), false));
}

#[test]
fn future_stages_are_read_only() {
    let m = StageMachine::new(stage(2));
    assert!(!m.is_editable(stage(3), false));
    assert!(!m.is_editable(stage(5), false));
}

#[test]
fn completed_stage_is_editable_only_in_edit_mode() {
    let m = StageMachine::new(stage(4));
    assert!(!m.is_editable(stage(2), false));

    let m = m.apply(StageAction::EnterEdit { at: stage(2) }).expect("edit");
    assert!(m.is_editable(stage(2), false));
    assert!(!m.is_editable(stage(3), false));
}

#[test]
fn entering_edit_replaces_previous_edit_stage() {
    let m = StageMachine::new(stage(4));
    let m = m.apply(StageAction::EnterEdit { at: stage(2) }).expect("edit 2");
    let m = m.apply(StageAction::EnterEdit { at: stage(3) }).expect("edit 3");
    assert_eq!(m.edit_stage(), Some(stage(3)));
    assert!(!m.is_editable(stage(2), false));
}

#[test]
fn enter_edit_rejected_for_non_completed_stage() {
    let m = StageMachine::new(stage(2));
    assert_eq!(
        m.apply(StageAction::EnterEdit { at: stage(2) }),
        Err(Rejected::NotCompleted { at: stage(2) })
    );
    assert_eq!(
        m.apply(StageAction::EnterEdit { at: stage(4) }),
        Err(Rejected::NotCompleted { at: stage(4) })
    );
}

#[test]
fn exit_edit_clears_the_flag() {
    let m = StageMachine::new(stage(4));
    let m = m.apply(StageAction::EnterEdit { at: stage(3) }).expect("edit");
    let m = m.apply(StageAction::ExitEdit).expect("exit");
    assert_eq!(m.edit_stage(), None);
}

#[test]
fn view_only_role_forces_every_stage_read_only() {
    let m = StageMachine::new(stage(3));
    let m = m.apply(StageAction::EnterEdit { at: stage(2) }).expect("edit");
    for s in Stage::ALL {
        assert!(!m.is_editable(s, true), "stage {} must be read-only", s.index());
    }
    // Sanity: the same machine allows edits for a writing role.
    assert!(m.is_editable(stage(3), false));
    assert!(m.is_editable(stage(2), false));
}

// =============================================================
// Server sync
// =============================================================

#[test]
fn sync_server_adopts_backend_stage() {
    let m = StageMachine::new(stage(1));
    let m = m.apply(StageAction::SyncServer { stage: stage(4) }).expect("sync");
    assert_eq!(m.current(), stage(4));
}

#[test]
fn sync_server_drops_edit_flag_invalidated_by_new_stage() {
    let m = StageMachine::new(stage(4));
    let m = m.apply(StageAction::EnterEdit { at: stage(3) }).expect("edit");

    // Backend says the patent is actually at stage 2: the stage-3 flag no
    // longer points at a completed stage.
    let m = m.apply(StageAction::SyncServer { stage: stage(2) }).expect("sync");
    assert_eq!(m.edit_stage(), None);

    // A still-completed stage keeps its flag.
    let m = StageMachine::new(stage(4));
    let m = m.apply(StageAction::EnterEdit { at: stage(2) }).expect("edit");
    let m = m.apply(StageAction::SyncServer { stage: stage(5) }).expect("sync");
    assert_eq!(m.edit_stage(), Some(stage(2)));
}

// =============================================================
// Completion and search gating
// =============================================================

#[test]
fn registration_is_always_completed() {
    let m = StageMachine::new(Stage::FIRST);
    assert!(m.is_completed(Stage::FIRST));
}

#[test]
fn stages_before_current_are_completed() {
    let m = StageMachine::new(stage(3));
    assert!(m.is_completed(stage(1)));
    assert!(m.is_completed(stage(2)));
    assert!(!m.is_completed(stage(3)));
    assert!(!m.is_completed(stage(4)));
}

#[test]
fn search_allowed_only_through_search_stage() {
    assert!(StageMachine::new(stage(0)).search_allowed());
    assert!(StageMachine::new(stage(1)).search_allowed());
    assert!(!StageMachine::new(stage(2)).search_allowed());
    assert!(!StageMachine::new(Stage::LAST).search_allowed());
}

#[test]
fn stage_labels_cover_all_six_steps() {
    let labels: Vec<&str> = Stage::ALL.iter().map(|s| s.label()).collect();
    assert_eq!(labels.len(), 6);
    assert!(labels[0].contains("Registration"));
    assert!(labels[5].contains("Grant"));
}
