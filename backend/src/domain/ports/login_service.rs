//! Driving port for session login.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, LoginCredentials, UserId};

/// Identifier issued to the fixture account.
pub const FIXTURE_USER_ID: Uuid = Uuid::from_u128(0x123e4567_e89b_12d3_a456_426614174000);

/// Authenticates credentials and yields the user to bind to the session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Accepts the single development account `admin` / `password`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        match (credentials.username(), credentials.password()) {
            ("admin", "password") => Ok(UserId::from_uuid(FIXTURE_USER_ID)),
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}
