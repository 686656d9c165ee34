//! Career profile service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{ProfileCommand, ProfileQuery, ProfileRepository};
use crate::domain::{CareerProfile, Error, UserId, UserProfile};

/// Service implementing [`ProfileCommand`] and [`ProfileQuery`].
#[derive(Clone)]
pub struct ProfileService<R> {
    repo: Arc<R>,
}

impl<R> ProfileService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> ProfileCommand for ProfileService<R>
where
    R: ProfileRepository,
{
    async fn save(&self, user_id: &UserId, profile: CareerProfile) -> Result<UserProfile, Error> {
        let stored = self
            .repo
            .upsert(&UserProfile {
                user_id: *user_id,
                profile,
            })
            .await?;
        info!(%user_id, complete = stored.profile.is_complete(), "profile saved");
        Ok(stored)
    }
}

#[async_trait]
impl<R> ProfileQuery for ProfileService<R>
where
    R: ProfileRepository,
{
    async fn get(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        Ok(self
            .repo
            .find(user_id)
            .await?
            .unwrap_or_else(|| UserProfile {
                user_id: *user_id,
                profile: CareerProfile::default(),
            }))
    }
}
