//! Finite-state table from action name to panel style and the step that runs
//! when the action is dispatched.

use std::collections::HashMap;

use shared::domain::{ActionName, StyleTag};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    FetchView,
    StartAdd,
    ConfirmAdd,
    FetchEdit,
    ConfirmEdit,
    FetchRemove,
    ConfirmRemove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub style: StyleTag,
    pub step: Step,
}

impl Transition {
    pub const fn new(style: StyleTag, step: Step) -> Self {
        Self { style, step }
    }
}

pub const STANDARD_TRANSITIONS: [(ActionName, Transition); 7] = [
    (
        ActionName::View,
        Transition::new(StyleTag::Primary, Step::FetchView),
    ),
    (
        ActionName::Add,
        Transition::new(StyleTag::Success, Step::StartAdd),
    ),
    (
        ActionName::ConfirmAdd,
        Transition::new(StyleTag::Success, Step::ConfirmAdd),
    ),
    (
        ActionName::Edit,
        Transition::new(StyleTag::Warning, Step::FetchEdit),
    ),
    (
        ActionName::ConfirmEdit,
        Transition::new(StyleTag::Warning, Step::ConfirmEdit),
    ),
    (
        ActionName::Remove,
        Transition::new(StyleTag::Danger, Step::FetchRemove),
    ),
    (
        ActionName::ConfirmRemove,
        Transition::new(StyleTag::Danger, Step::ConfirmRemove),
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionTableError {
    #[error("action '{0}' has no transition")]
    Unmapped(ActionName),
    #[error("action '{0}' is mapped more than once")]
    Duplicate(ActionName),
    #[error("action '{action}' is styled {style} but '{base}' is styled {base_style}")]
    StyleMismatch {
        action: ActionName,
        style: StyleTag,
        base: ActionName,
        base_style: StyleTag,
    },
}

#[derive(Debug, Clone)]
pub struct ActionTable {
    transitions: HashMap<ActionName, Transition>,
}

impl ActionTable {
    pub fn standard() -> Result<Self, ActionTableError> {
        Self::from_entries(STANDARD_TRANSITIONS)
    }

    /// Builds a table, rejecting duplicates, any action left unmapped, and
    /// confirm steps styled differently from their base action.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (ActionName, Transition)>,
    ) -> Result<Self, ActionTableError> {
        let mut transitions = HashMap::new();
        for (action, transition) in entries {
            if transitions.insert(action, transition).is_some() {
                return Err(ActionTableError::Duplicate(action));
            }
        }

        for action in ActionName::ALL {
            let Some(transition) = transitions.get(&action) else {
                return Err(ActionTableError::Unmapped(action));
            };
            let base = action.base();
            if base == action {
                continue;
            }
            let Some(base_transition) = transitions.get(&base) else {
                return Err(ActionTableError::Unmapped(base));
            };
            if base_transition.style != transition.style {
                return Err(ActionTableError::StyleMismatch {
                    action,
                    style: transition.style,
                    base,
                    base_style: base_transition.style,
                });
            }
        }

        Ok(Self { transitions })
    }

    pub fn get(&self, action: ActionName) -> Option<Transition> {
        self.transitions.get(&action).copied()
    }

    pub fn style_of(&self, action: ActionName) -> Option<StyleTag> {
        self.get(action).map(|transition| transition.style)
    }

    /// Resolves a raw action name; anything unrecognized yields `None`.
    pub fn resolve(&self, raw: &str) -> Option<(ActionName, Transition)> {
        let action = raw.parse::<ActionName>().ok()?;
        self.get(action).map(|transition| (action, transition))
    }
}
