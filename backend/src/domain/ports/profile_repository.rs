//! Port for career profiles.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
    }
}

impl From<ProfileRepositoryError> for Error {
    fn from(value: ProfileRepositoryError) -> Self {
        Error::upstream(value.to_string())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, ProfileRepositoryError>;

    /// Insert or replace the user's profile.
    async fn upsert(&self, profile: &UserProfile) -> Result<UserProfile, ProfileRepositoryError>;
}
