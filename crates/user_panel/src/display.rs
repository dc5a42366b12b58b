//! Panel header and styling helpers.

use shared::domain::{ActionName, StyleTag, UserRecord};

/// Header for a panel mode. Confirm titles end with a space so the subject
/// can be appended.
pub fn display_title(name: ActionName) -> &'static str {
    match name {
        ActionName::View => "View Users",
        ActionName::Add => "Add User",
        ActionName::ConfirmAdd => "Confirm Add ",
        ActionName::Edit => "Edit Users",
        ActionName::ConfirmEdit => "Confirm Edit ",
        ActionName::Remove => "Remove Users",
        ActionName::ConfirmRemove => "Confirm Remove ",
    }
}

/// Title for a raw mode string; unknown modes get an empty title.
pub fn title_for(raw: &str) -> &'static str {
    raw.parse::<ActionName>().map(display_title).unwrap_or("")
}

/// Confirm headers name their subject, other headers are the bare title.
pub fn display_heading(name: ActionName, current: Option<&UserRecord>) -> String {
    let title = display_title(name);
    match current {
        Some(user) if name.is_confirm() && !user.name.trim().is_empty() => {
            format!("{title}{}", user.name.trim())
        }
        _ => title.trim_end().to_string(),
    }
}

pub fn style_class(style: StyleTag) -> &'static str {
    match style {
        StyleTag::Primary => "panel-primary",
        StyleTag::Success => "panel-success",
        StyleTag::Warning => "panel-warning",
        StyleTag::Danger => "panel-danger",
    }
}

/// One-line label used in tables and confirm prompts.
pub fn describe_user(user: &UserRecord) -> String {
    let name = user.name.trim();
    let email = user.email.trim();
    match (name.is_empty(), email.is_empty()) {
        (false, false) => format!("{name} <{email}>"),
        (false, true) => name.to_string(),
        (true, false) => format!("<{email}>"),
        (true, true) => "(unnamed user)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_a_title() {
        for name in ActionName::ALL {
            assert!(!display_title(name).trim().is_empty(), "{name}");
        }
        assert_eq!(display_title(ActionName::View), "View Users");
        assert_eq!(display_title(ActionName::ConfirmEdit), "Confirm Edit ");
    }

    #[test]
    fn unknown_mode_gets_empty_title() {
        assert_eq!(title_for("archive"), "");
        assert_eq!(title_for("remove"), "Remove Users");
    }

    #[test]
    fn confirm_heading_names_the_subject() {
        let bleys = UserRecord::new("Bleys", "bleys@amber.com");
        assert_eq!(
            display_heading(ActionName::ConfirmEdit, Some(&bleys)),
            "Confirm Edit Bleys"
        );
        assert_eq!(display_heading(ActionName::ConfirmEdit, None), "Confirm Edit");
        assert_eq!(display_heading(ActionName::Edit, Some(&bleys)), "Edit Users");
    }

    #[test]
    fn describes_partial_users() {
        assert_eq!(
            describe_user(&UserRecord::new("Bleys", "bleys@amber.com")),
            "Bleys <bleys@amber.com>"
        );
        assert_eq!(describe_user(&UserRecord::new("", "fiona@amber.com")), "<fiona@amber.com>");
        assert_eq!(describe_user(&UserRecord::default()), "(unnamed user)");
    }

    #[test]
    fn style_classes_follow_style_tag() {
        assert_eq!(style_class(StyleTag::Warning), "panel-warning");
        assert_eq!(style_class(StyleTag::Primary), "panel-primary");
    }
}
