//! Career profile used as the default input for roadmap generation.

use crate::domain::UserId;

/// A user's current and target roles. Either may be blank until set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CareerProfile {
    pub current_role: String,
    pub target_role: String,
}

impl CareerProfile {
    pub fn new(current_role: impl AsRef<str>, target_role: impl AsRef<str>) -> Self {
        Self {
            current_role: current_role.as_ref().trim().to_owned(),
            target_role: target_role.as_ref().trim().to_owned(),
        }
    }

    /// Both roles are present, so a roadmap can be generated from the profile alone.
    pub fn is_complete(&self) -> bool {
        !self.current_role.is_empty() && !self.target_role.is_empty()
    }
}

/// A stored profile row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: UserId,
    pub profile: CareerProfile,
}
