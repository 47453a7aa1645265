//! UI gating helpers
//!
//! These only decide what to show. The backend re-checks every permission.

use crate::model::{RoleKind, User};

/// Whether the current user may edit a record created by `creator_id`
pub fn can_edit(user: Option<&User>, creator_id: &str) -> bool {
    user.is_some_and(|u| u.owns(creator_id))
}

/// Whether the current user holds `role`; admins pass every check
pub fn has_role(user: Option<&User>, role: RoleKind) -> bool {
    user.is_some_and(|u| {
        let kind = u.role_kind();
        kind == role || kind == RoleKind::Admin
    })
}
