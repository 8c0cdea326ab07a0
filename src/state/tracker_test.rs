use super::*;

fn patent(id: i64, stage: i64) -> Patent {
    Patent {
        id,
        title: format!("patent {id}"),
        description: None,
        stage,
        related: Vec::new(),
    }
}

fn stage(i: u8) -> Stage {
    Stage::new(i).expect("valid stage")
}

#[test]
fn new_tracker_has_one_form_per_stage() {
    let t = TrackerState::new();
    assert_eq!(t.forms.len(), 6);
    assert!(t.patent.is_none());
}

#[test]
fn begin_load_bumps_generation_and_resets_state() {
    let mut t = TrackerState::new();
    let g1 = t.begin_load();
    assert!(t.try_adopt(g1, patent(1, 2)));
    t.form_mut(stage(2)).notes = "draft".to_owned();

    let g2 = t.begin_load();
    assert!(g2 > g1);
    assert!(t.patent.is_none());
    assert!(t.form(stage(2)).notes.is_empty());
}

#[test]
fn generation_stays_monotonic_across_reloads() {
    let mut t = TrackerState::new();
    let g1 = t.begin_load();
    let g2 = t.begin_load();
    let g3 = t.begin_load();
    assert_eq!((g2, g3), (g1 + 1, g1 + 2));
}

#[test]
fn adopt_sets_machine_from_record_stage() {
    let mut t = TrackerState::new();
    let g = t.begin_load();
    assert!(t.try_adopt(g, patent(1, 3)));
    assert_eq!(t.machine.current(), stage(3));
}

#[test]
fn stale_generation_is_ignored() {
    let mut t = TrackerState::new();
    let stale = t.begin_load();
    let fresh = t.begin_load();

    // A response from the superseded load must not land.
    assert!(!t.try_adopt(stale, patent(1, 4)));
    assert!(t.patent.is_none());

    assert!(t.try_adopt(fresh, patent(2, 1)));
    assert_eq!(t.patent.as_ref().map(|p| p.id), Some(2));
}

#[test]
fn out_of_range_record_stage_falls_back_to_registration() {
    let mut t = TrackerState::new();
    let g = t.begin_load();
    assert!(t.try_adopt(g, patent(1, 42)));
    assert_eq!(t.machine.current(), Stage::FIRST);
}

#[test]
fn adopt_preserves_valid_edit_mode_across_refresh() {
    let mut t = TrackerState::new();
    let g = t.begin_load();
    assert!(t.try_adopt(g, patent(1, 4)));
    t.machine = t
        .machine
        .apply(StageAction::EnterEdit { at: stage(2) })
        .expect("edit");

    assert!(t.try_adopt(g, patent(1, 4)));
    assert_eq!(t.machine.edit_stage(), Some(stage(2)));
}

#[test]
fn attachment_probe_result_respects_generation() {
    let mut t = TrackerState::new();
    let stale = t.begin_load();
    let fresh = t.begin_load();

    t.set_attachment_url(stale, stage(3), Some("https://old".to_owned()));
    assert_eq!(t.form(stage(3)).attachment_url, None);

    t.set_attachment_url(fresh, stage(3), Some("https://new".to_owned()));
    assert_eq!(t.form(stage(3)).attachment_url.as_deref(), Some("https://new"));
}

#[test]
fn absent_attachment_leaves_url_unset() {
    let mut t = TrackerState::new();
    let g = t.begin_load();
    t.set_attachment_url(g, stage(2), None);
    assert_eq!(t.form(stage(2)).attachment_url, None);
}

#[test]
fn can_search_requires_loaded_patent_term_and_early_stage() {
    let mut t = TrackerState::new();
    t.search_term = "widget".to_owned();
    assert!(!t.can_search(), "no patent loaded yet");

    let g = t.begin_load();
    assert!(t.try_adopt(g, patent(1, 1)));
    t.search_term = "widget".to_owned();
    assert!(t.can_search());

    t.search_term = "   ".to_owned();
    assert!(!t.can_search(), "blank term");

    t.search_term = "widget".to_owned();
    t.search_busy = true;
    assert!(!t.can_search(), "search already in flight");

    t.search_busy = false;
    assert!(t.try_adopt(g, patent(1, 2)));
    assert!(!t.can_search(), "past the search stage");
}

#[test]
fn related_is_empty_until_a_record_with_associations_loads() {
    let mut t = TrackerState::new();
    assert!(t.related().is_empty());

    let g = t.begin_load();
    let mut p = patent(1, 1);
    p.related.push(RelatedPatent {
        id: 9,
        title: "Similar widget".to_owned(),
        application_number: "BR1020".to_owned(),
        ..RelatedPatent::default()
    });
    assert!(t.try_adopt(g, p));
    assert_eq!(t.related().len(), 1);
}
