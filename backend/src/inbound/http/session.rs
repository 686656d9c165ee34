//! Cookie-backed identity for the coaching API.
//!
//! [`SessionContext`] is the only way a handler learns who is calling. The
//! user id lives in the signed and encrypted session cookie under
//! [`USER_ID_KEY`]; anything unreadable there is treated as anonymous, so
//! `require_user_id` fails closed with `401 Unauthorized`.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "careerlog.user_id";

/// Interpret the raw cookie value, discarding anything that is not a UUID.
fn decode_user_id(raw: Option<String>) -> Option<UserId> {
    let raw = raw?;
    match UserId::new(&raw) {
        Ok(id) => Some(id),
        Err(error) => {
            tracing::warn!(%error, "ignoring malformed user id in session cookie");
            None
        }
    }
}

/// Authenticated-user view over the Actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind `user_id` to the session, rotating the cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Forget the user and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// The signed-in user, or `None` for anonymous callers.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        self.0
            .get::<String>(USER_ID_KEY)
            .map(decode_user_id)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(Self::new) })
    }
}
