//! Driving ports for the career profile.

use async_trait::async_trait;

use crate::domain::{CareerProfile, Error, UserId, UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    async fn save(&self, user_id: &UserId, profile: CareerProfile) -> Result<UserProfile, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// The stored profile, or a blank one when none was saved.
    async fn get(&self, user_id: &UserId) -> Result<UserProfile, Error>;
}
