use shared::domain::{ActionName, StyleTag, UserRecord};

/// What the panel is showing right now. `style` only ever changes together
/// with `name`, through the action table.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub(crate) name: ActionName,
    pub(crate) style: StyleTag,
    pub(crate) current: Option<UserRecord>,
    pub(crate) submit_loading: bool,
    pub(crate) action_loading: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            name: ActionName::View,
            style: StyleTag::Primary,
            current: None,
            submit_loading: false,
            action_loading: false,
        }
    }
}

impl PanelState {
    pub fn name(&self) -> ActionName {
        self.name
    }

    pub fn style(&self) -> StyleTag {
        self.style
    }

    pub fn current(&self) -> Option<&UserRecord> {
        self.current.as_ref()
    }

    pub fn submit_loading(&self) -> bool {
        self.submit_loading
    }

    pub fn action_loading(&self) -> bool {
        self.action_loading
    }

    pub(crate) fn transition(&mut self, name: ActionName, style: StyleTag) {
        self.name = name;
        self.style = style;
    }
}
