use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user as the admin panel sees it. Only `name`, `email` and `role` are
/// interpreted; anything else the backend sends rides along in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// Sort state of the user table. Owned by the panel, interpreted only by the
/// table utility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    pub sort_column: Option<String>,
    pub reverse: bool,
}

/// Panel mode of the user administration view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionName {
    View,
    Add,
    ConfirmAdd,
    Edit,
    ConfirmEdit,
    Remove,
    ConfirmRemove,
}

impl ActionName {
    pub const ALL: [ActionName; 7] = [
        ActionName::View,
        ActionName::Add,
        ActionName::ConfirmAdd,
        ActionName::Edit,
        ActionName::ConfirmEdit,
        ActionName::Remove,
        ActionName::ConfirmRemove,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionName::View => "view",
            ActionName::Add => "add",
            ActionName::ConfirmAdd => "confirm-add",
            ActionName::Edit => "edit",
            ActionName::ConfirmEdit => "confirm-edit",
            ActionName::Remove => "remove",
            ActionName::ConfirmRemove => "confirm-remove",
        }
    }

    /// The action a confirm step belongs to; non-confirm actions map to themselves.
    pub fn base(self) -> ActionName {
        match self {
            ActionName::ConfirmAdd => ActionName::Add,
            ActionName::ConfirmEdit => ActionName::Edit,
            ActionName::ConfirmRemove => ActionName::Remove,
            other => other,
        }
    }

    pub fn is_confirm(self) -> bool {
        matches!(
            self,
            ActionName::ConfirmAdd | ActionName::ConfirmEdit | ActionName::ConfirmRemove
        )
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action name '{0}'")]
pub struct UnknownActionName(pub String);

impl FromStr for ActionName {
    type Err = UnknownActionName;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ActionName::ALL
            .into_iter()
            .find(|name| name.as_str() == raw)
            .ok_or_else(|| UnknownActionName(raw.to_string()))
    }
}

/// Visual severity of the active panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTag {
    Primary,
    Success,
    Warning,
    Danger,
}

impl StyleTag {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleTag::Primary => "primary",
            StyleTag::Success => "success",
            StyleTag::Warning => "warning",
            StyleTag::Danger => "danger",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert severity accepted by the notification service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Danger,
    Success,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Danger => "danger",
            Severity::Success => "success",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutation carried by a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitKind {
    Add,
    Edit,
    Remove,
}

impl SubmitKind {
    /// The confirm step that must be active before this mutation is sent.
    pub fn confirm_action(self) -> ActionName {
        match self {
            SubmitKind::Add => ActionName::ConfirmAdd,
            SubmitKind::Edit => ActionName::ConfirmEdit,
            SubmitKind::Remove => ActionName::ConfirmRemove,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubmitKind::Add => "add",
            SubmitKind::Edit => "edit",
            SubmitKind::Remove => "remove",
        }
    }
}

impl fmt::Display for SubmitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_names_parse_from_kebab_case() {
        for name in ActionName::ALL {
            assert_eq!(name.as_str().parse::<ActionName>(), Ok(name));
        }
        assert_eq!(
            "confirm-edit".parse::<ActionName>(),
            Ok(ActionName::ConfirmEdit)
        );
        assert!("confirm_edit".parse::<ActionName>().is_err());
        assert!("".parse::<ActionName>().is_err());
    }

    #[test]
    fn padded_action_names_are_not_recognized() {
        assert_eq!(
            " view ".parse::<ActionName>(),
            Err(UnknownActionName(" view ".to_string()))
        );
        assert!("edit\n".parse::<ActionName>().is_err());
        assert_eq!(
            UnknownActionName("archive".to_string()).to_string(),
            "unknown action name 'archive'"
        );
    }

    #[test]
    fn submit_kinds_map_to_their_confirm_step() {
        assert_eq!(SubmitKind::Add.confirm_action(), ActionName::ConfirmAdd);
        assert_eq!(SubmitKind::Edit.confirm_action(), ActionName::ConfirmEdit);
        assert_eq!(SubmitKind::Remove.confirm_action(), ActionName::ConfirmRemove);
    }

    #[test]
    fn confirm_actions_resolve_to_their_base() {
        assert_eq!(ActionName::ConfirmAdd.base(), ActionName::Add);
        assert_eq!(ActionName::ConfirmRemove.base(), ActionName::Remove);
        assert_eq!(ActionName::View.base(), ActionName::View);
        assert!(ActionName::ConfirmEdit.is_confirm());
        assert!(!ActionName::Edit.is_confirm());
    }

    #[test]
    fn action_name_serializes_like_its_display_form() {
        let raw = serde_json::to_string(&ActionName::ConfirmRemove).expect("serialize");
        assert_eq!(raw, "\"confirm-remove\"");
    }

    #[test]
    fn user_record_keeps_unknown_fields() {
        let raw = r#"{"name":"Corwin","email":"corwin@amber.com","role":"merchant","id":7}"#;
        let user: UserRecord = serde_json::from_str(raw).expect("decode");
        assert_eq!(user.name, "Corwin");
        assert_eq!(user.extra.get("id"), Some(&serde_json::json!(7)));

        let encoded = serde_json::to_value(&user).expect("encode");
        assert_eq!(encoded["id"], serde_json::json!(7));
    }

    #[test]
    fn user_record_tolerates_missing_fields() {
        let user: UserRecord = serde_json::from_str(r#"{"name":"corwin"}"#).expect("decode");
        assert_eq!(user.name, "corwin");
        assert!(user.email.is_empty());
        assert!(user.role.is_empty());
    }
}
