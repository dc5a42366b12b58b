//! Alert copy for every (submit kind, outcome) pair.

use shared::domain::{Severity, SubmitKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitCopy {
    pub kind: SubmitKind,
    pub failure: &'static str,
    pub success: &'static str,
}

/// Indexed by `SubmitKind` discriminant.
pub const SUBMIT_COPY: [SubmitCopy; 3] = [
    SubmitCopy {
        kind: SubmitKind::Add,
        failure: "Unable to add user. Please try again.",
        success: "User added, verification email sent.",
    },
    SubmitCopy {
        kind: SubmitKind::Edit,
        failure: "Unable to edit user. Please try again.",
        success: "User edited successfully.",
    },
    SubmitCopy {
        kind: SubmitKind::Remove,
        failure: "Unable to remove user. Please try again.",
        success: "User removed successfully.",
    },
];

pub fn submit_copy(kind: SubmitKind) -> &'static SubmitCopy {
    &SUBMIT_COPY[kind as usize]
}

pub fn submit_alert(kind: SubmitKind, failed: bool) -> (Severity, &'static str) {
    let copy = submit_copy(kind);
    if failed {
        (Severity::Danger, copy.failure)
    } else {
        (Severity::Success, copy.success)
    }
}
