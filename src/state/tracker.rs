//! Per-patent tracker state behind the stage timeline.
//!
//! DESIGN
//! ======
//! One `TrackerState` exists per opened patent dialog. Async completions are
//! tied to the load that started them through a request generation: opening a
//! (new) patent bumps the generation, and a response carrying a stale
//! generation is ignored instead of overwriting the currently displayed
//! record.

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tracker_test;

use crate::net::types::{Patent, RelatedPatent};
use crate::state::stage::{Stage, StageAction, StageMachine, STAGE_COUNT};

/// Notes + attachment form for one stage (stages 2..=5 render it).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StageForm {
    /// Free-text stage notes, saved independently of stage advancement.
    pub notes: String,
    /// Name of the file picked in the form, before saving.
    pub file_name: Option<String>,
    /// Signed URL of an already-persisted attachment, if the probe found one.
    pub attachment_url: Option<String>,
    /// Save request in flight.
    pub saving: bool,
}

/// State for the patent currently shown in the timeline dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackerState {
    /// The loaded record; `None` until the detail fetch lands.
    pub patent: Option<Patent>,
    /// Workflow position and edit-mode flag.
    pub machine: StageMachine,
    /// One form per stage, indexed by stage index.
    pub forms: Vec<StageForm>,
    /// Similarity search input.
    pub search_term: String,
    /// Similarity search request in flight.
    pub search_busy: bool,
    /// Stage-advance request in flight.
    pub finalize_busy: bool,
    /// Request generation for the current load; see module docs.
    generation: u64,
}

impl TrackerState {
    pub fn new() -> Self {
        Self {
            forms: vec![StageForm::default(); STAGE_COUNT as usize],
            ..Self::default()
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Begin loading a patent: clear the previous record and invalidate every
    /// in-flight response. Returns the generation the new load must carry.
    pub fn begin_load(&mut self) -> u64 {
        let next = self.generation.wrapping_add(1);
        *self = Self::new();
        self.generation = next;
        next
    }

    /// Adopt a refreshed backend record if it belongs to the current load.
    /// Returns whether the record was accepted.
    pub fn try_adopt(&mut self, generation: u64, patent: Patent) -> bool {
        if generation != self.generation {
            return false;
        }
        let stage = Stage::from_record(patent.stage).unwrap_or_else(|| {
            leptos::logging::warn!(
                "patent {} carries out-of-range stage {}; treating as registration",
                patent.id,
                patent.stage
            );
            Stage::FIRST
        });
        // SyncServer never fails; it only drops an invalidated edit flag.
        if let Ok(next) = self.machine.apply(StageAction::SyncServer { stage }) {
            self.machine = next;
        }
        self.patent = Some(patent);
        true
    }

    /// Related records of the loaded patent, if any.
    pub fn related(&self) -> &[RelatedPatent] {
        self.patent.as_ref().map_or(&[], |p| p.related.as_slice())
    }

    pub fn form(&self, at: Stage) -> &StageForm {
        &self.forms[at.index() as usize]
    }

    pub fn form_mut(&mut self, at: Stage) -> &mut StageForm {
        &mut self.forms[at.index() as usize]
    }

    /// Record a probe result. Stale generations are ignored like any other
    /// async completion.
    pub fn set_attachment_url(&mut self, generation: u64, at: Stage, url: Option<String>) {
        if generation == self.generation {
            self.form_mut(at).attachment_url = url;
        }
    }

    /// Whether the similarity search may be issued right now.
    pub fn can_search(&self) -> bool {
        self.patent.is_some()
            && !self.search_busy
            && self.machine.search_allowed()
            && !self.search_term.trim().is_empty()
    }
}
