//! Shared harness for the end-to-end HTTP scenarios.
//!
//! Builds the real application stack (trace middleware, cookie sessions,
//! every handler, every domain service) over the in-memory store, with a
//! pinned clock and a scripted completion service standing in for the
//! provider.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use backend::Trace;
use backend::domain::ports::LoginService;
use backend::domain::{Error, LoginCredentials, UserId};
use backend::inbound::http::configure_api;
use backend::outbound::memory::MemoryStore;
use backend::test_support::{MutableClock, ScriptedCompletion};
use backend::wiring::RepositoryBundle;

pub const PASSWORD: &str = "password";

/// Accepts a fixed set of usernames, each mapped to its own user id.
struct NamedUsers;

impl NamedUsers {
    fn user_for(name: &str) -> Option<UserId> {
        let id = match name {
            "alice" => 0xa11ce,
            "bob" => 0xb0b,
            _ => return None,
        };
        Some(UserId::from_uuid(Uuid::from_u128(id)))
    }
}

#[async_trait]
impl LoginService for NamedUsers {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.password() != PASSWORD {
            return Err(Error::unauthorized("invalid credentials"));
        }
        Self::user_for(credentials.username())
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}

/// 2026-03-10 09:00 UTC.
pub fn start_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub struct Harness {
    pub clock: Arc<MutableClock>,
    pub completion: Arc<ScriptedCompletion>,
    state: web::Data<backend::inbound::http::state::HttpState>,
    key: Key,
}

impl Harness {
    pub fn new() -> Self {
        let clock = Arc::new(MutableClock::new(start_instant()));
        let completion = Arc::new(ScriptedCompletion::new());
        let state = RepositoryBundle::shared(Arc::new(MemoryStore::new())).into_http_state(
            Arc::new(NamedUsers),
            completion.clone(),
            clock.clone(),
        );
        Self {
            clock,
            completion,
            state: web::Data::new(state),
            key: Key::generate(),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name("session".to_owned())
            .cookie_secure(false)
            .build();
        App::new()
            .app_data(self.state.clone())
            .wrap(Trace)
            .service(web::scope("/api/v1").wrap(session).configure(configure_api))
    }
}

/// Log `username` in and return the session cookie.
pub async fn login<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": username, "password": PASSWORD}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login for {username}");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

async fn into_parts(res: ServiceResponse) -> (StatusCode, Value) {
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

pub async fn get_json<S>(app: &S, cookie: &Cookie<'static>, uri: &str) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    into_parts(test::call_service(app, req).await).await
}

pub async fn post_json<S>(
    app: &S,
    cookie: &Cookie<'static>,
    uri: &str,
    body: Value,
) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();
    into_parts(test::call_service(app, req).await).await
}

pub async fn patch_json<S>(
    app: &S,
    cookie: &Cookie<'static>,
    uri: &str,
    body: Value,
) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::patch()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();
    into_parts(test::call_service(app, req).await).await
}

pub async fn put_json<S>(
    app: &S,
    cookie: &Cookie<'static>,
    uri: &str,
    body: Value,
) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::put()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();
    into_parts(test::call_service(app, req).await).await
}

/// Annotation payload wrapped in a Markdown fence, as providers often send.
pub fn fenced_annotation(summary: &str) -> String {
    format!(
        "```json\n{}\n```",
        json!({
            "summary": summary,
            "suggestions": ["Block an hour for deep work", "Write down one win"],
            "moodInsight": "Energy is trending up",
        })
    )
}

/// Achievement keys from an array of achievement DTOs.
pub fn keys(achievements: &Value) -> Vec<String> {
    achievements
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|a| a["achievementKey"].as_str().map(str::to_owned))
        .collect()
}
