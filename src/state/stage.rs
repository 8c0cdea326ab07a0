//! The six-stage patent workflow state machine.
//!
//! DESIGN
//! ======
//! The workflow is strictly linear: registration, similarity search, payment
//! voucher, formal examination, merit examination, grant. The machine is a
//! pure value type with a `(state, action) -> state | rejected` transition
//! function so the timeline UI can consult it before issuing any backend
//! call, and tests can exercise every rule without a DOM.

#[cfg(test)]
#[path = "stage_test.rs"]
mod stage_test;

/// Number of workflow stages.
pub const STAGE_COUNT: u8 = 6;

/// A validated stage index in `0..=5`.
///
/// `Stage::new` is the only constructor, so out-of-range indices are
/// unrepresentable past the deserialization boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stage(u8);

impl Stage {
    /// Registration, permanently complete and read-only.
    pub const FIRST: Stage = Stage(0);
    /// Similarity search; the last stage at which the search is allowed.
    pub const SEARCH: Stage = Stage(1);
    /// Grant, the terminal stage.
    pub const LAST: Stage = Stage(STAGE_COUNT - 1);

    /// All stages in workflow order, for rendering.
    pub const ALL: [Stage; STAGE_COUNT as usize] =
        [Stage(0), Stage(1), Stage(2), Stage(3), Stage(4), Stage(5)];

    pub fn new(index: u8) -> Option<Self> {
        (index < STAGE_COUNT).then_some(Stage(index))
    }

    /// Validate a raw stage value from a backend record.
    pub fn from_record(raw: i64) -> Option<Self> {
        u8::try_from(raw).ok().and_then(Self::new)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn next(self) -> Option<Stage> {
        Self::new(self.0 + 1)
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Whether this stage carries a notes + attachment form.
    pub fn has_form(self) -> bool {
        self.0 >= 2
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "Stage 1: Registration",
            1 => "Stage 2: Similarity search",
            2 => "Stage 3: Payment voucher",
            3 => "Stage 4: Formal examination",
            4 => "Stage 5: Merit examination",
            _ => "Stage 6: Grant",
        }
    }
}

/// An action applied to the machine by the timeline UI or by a fresh backend
/// record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageAction {
    /// Advance from `at` to the next stage. Only valid at the current stage.
    Finalize { at: Stage },
    /// Put a completed stage into edit mode (one at a time).
    EnterEdit { at: Stage },
    /// Leave edit mode.
    ExitEdit,
    /// Adopt the stage from a refreshed backend record as source of truth.
    SyncServer { stage: Stage },
}

/// Why a transition was rejected. Rejections are local no-ops; callers must
/// not issue a backend call for a rejected action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejected {
    /// `Finalize` targeted a stage other than the current one.
    NotCurrentStage { at: Stage, current: Stage },
    /// The patent already reached the terminal grant stage.
    AlreadyGranted,
    /// Registration is permanently read-only.
    RegistrationImmutable,
    /// `EnterEdit` targeted a stage that is not completed yet.
    NotCompleted { at: Stage },
}

impl std::fmt::Display for Rejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotCurrentStage { at, current } => write!(
                f,
                "{} can only advance from the current stage ({}).",
                at.label(),
                current.label()
            ),
            Self::AlreadyGranted => f.write_str("The patent has already been granted."),
            Self::RegistrationImmutable => {
                f.write_str("The registration stage cannot be changed.")
            }
            Self::NotCompleted { at } => {
                write!(f, "{} is not completed yet.", at.label())
            }
        }
    }
}

/// Pure state for one patent's workflow position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageMachine {
    current: Stage,
    edit: Option<Stage>,
}

impl Default for StageMachine {
    fn default() -> Self {
        Self::new(Stage::FIRST)
    }
}

impl StageMachine {
    pub fn new(current: Stage) -> Self {
        Self { current, edit: None }
    }

    pub fn current(self) -> Stage {
        self.current
    }

    pub fn edit_stage(self) -> Option<Stage> {
        self.edit
    }

    /// Apply one action, returning the next machine state or a rejection.
    ///
    /// # Errors
    ///
    /// Returns the `Rejected` reason when the action violates a workflow
    /// rule; the machine is unchanged and no backend call may follow.
    pub fn apply(self, action: StageAction) -> Result<Self, Rejected> {
        match action {
            StageAction::Finalize { at } => {
                if self.current.is_last() {
                    return Err(Rejected::AlreadyGranted);
                }
                if at != self.current {
                    return Err(Rejected::NotCurrentStage { at, current: self.current });
                }
                // `current` is not LAST here, so `next()` always exists.
                let next = self.current.next().unwrap_or(Stage::LAST);
                Ok(Self {
                    current: next,
                    edit: self.edit.filter(|&e| e != at),
                })
            }
            StageAction::EnterEdit { at } => {
                if at == Stage::FIRST {
                    return Err(Rejected::RegistrationImmutable);
                }
                if at >= self.current {
                    return Err(Rejected::NotCompleted { at });
                }
                Ok(Self { edit: Some(at), ..self })
            }
            StageAction::ExitEdit => Ok(Self { edit: None, ..self }),
            StageAction::SyncServer { stage } => Ok(Self {
                current: stage,
                // An edit flag is only meaningful on a completed stage.
                edit: self.edit.filter(|&e| e != Stage::FIRST && e < stage),
            }),
        }
    }

    /// Editability of `at` for the acting role.
    ///
    /// Registration is never editable; the current stage is editable; a
    /// completed stage is editable only while in edit mode. A view-only role
    /// overrides everything.
    pub fn is_editable(self, at: Stage, view_only: bool) -> bool {
        if view_only || at == Stage::FIRST {
            return false;
        }
        if at == self.current {
            return true;
        }
        at < self.current && self.edit == Some(at)
    }

    /// Whether `at` is shown as completed. Registration always is.
    pub fn is_completed(self, at: Stage) -> bool {
        at == Stage::FIRST || at < self.current
    }

    /// The similarity search is only permitted while the patent has not
    /// advanced past the search stage.
    pub fn search_allowed(self) -> bool {
        self.current <= Stage::SEARCH
    }

    /// Terminal-state marker, for UI purposes only.
    pub fn is_granted(self) -> bool {
        self.current.is_last()
    }
}
