//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    MockAchievementsQuery, MockCheckInCommand, MockCheckInQuery, MockDailyProgressCommand,
    MockDailyTaskCommand, MockDailyTaskQuery, MockDashboardQuery, MockInsightsQuery,
    MockLoginService, MockProfileCommand, MockProfileQuery, MockProgressCommand,
    MockRoadmapCommand, MockRoadmapQuery,
};
use crate::domain::{CalendarDay, CheckIn, CheckInEntry, Error, Mood, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

pub const TEST_USER: Uuid = Uuid::from_u128(0x5d1e_0000_0000_4000_8000_0000_0000_0001);
const SEED_SESSION_PATH: &str = "/test/session";

pub fn test_user() -> UserId {
    UserId::from_uuid(TEST_USER)
}

pub fn instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 8, 15, 0)
        .single()
        .expect("valid timestamp")
}

pub fn day(raw: &str) -> CalendarDay {
    CalendarDay::parse(raw).expect("valid day")
}

/// Check-in owned by [`test_user`] on 2026-03-10.
pub fn sample_check_in() -> CheckIn {
    CheckIn {
        id: Uuid::from_u128(7),
        user_id: test_user(),
        check_in_date: day("2026-03-10"),
        created_at: instant(),
        entry: CheckInEntry {
            mood: Mood::new(7).expect("valid mood"),
            content: "Reviewed the queue design".into(),
            challenges: "Flaky CI".into(),
        },
        annotation: None,
    }
}

/// One unconfigured mock per driving port; tests set expectations on the
/// fields they exercise and leave the rest to panic if touched.
#[derive(Default)]
pub struct TestPorts {
    pub login: MockLoginService,
    pub check_ins: MockCheckInCommand,
    pub check_ins_query: MockCheckInQuery,
    pub progress: MockProgressCommand,
    pub achievements_query: MockAchievementsQuery,
    pub daily_progress: MockDailyProgressCommand,
    pub roadmaps: MockRoadmapCommand,
    pub roadmaps_query: MockRoadmapQuery,
    pub insights: MockInsightsQuery,
    pub daily_tasks: MockDailyTaskCommand,
    pub daily_tasks_query: MockDailyTaskQuery,
    pub dashboard: MockDashboardQuery,
    pub profile: MockProfileCommand,
    pub profile_query: MockProfileQuery,
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            check_ins: Arc::new(self.check_ins),
            check_ins_query: Arc::new(self.check_ins_query),
            progress: Arc::new(self.progress),
            achievements_query: Arc::new(self.achievements_query),
            daily_progress: Arc::new(self.daily_progress),
            roadmaps: Arc::new(self.roadmaps),
            roadmaps_query: Arc::new(self.roadmaps_query),
            insights: Arc::new(self.insights),
            daily_tasks: Arc::new(self.daily_tasks),
            daily_tasks_query: Arc::new(self.daily_tasks_query),
            dashboard: Arc::new(self.dashboard),
            profile: Arc::new(self.profile),
            profile_query: Arc::new(self.profile_query),
        }
    }
}

async fn seed_session(session: SessionContext) -> Result<HttpResponse, Error> {
    session.persist_user(&test_user())?;
    Ok(HttpResponse::Ok().finish())
}

/// App with the given handlers under `/api/v1` and a route that logs the
/// test user in.
pub fn test_app(
    ports: TestPorts,
    configure: impl FnOnce(&mut web::ServiceConfig),
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .wrap(test_session_middleware())
        .route(SEED_SESSION_PATH, web::post().to(seed_session))
        .service(web::scope("/api/v1").configure(configure))
}

/// Log the test user in and return the session cookie.
pub async fn login_cookie<S>(app: &S) -> Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let res = test::call_service(
        app,
        test::TestRequest::post().uri(SEED_SESSION_PATH).to_request(),
    )
    .await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

pub async fn read_json(res: ServiceResponse) -> serde_json::Value {
    let body = test::read_body(res).await;
    serde_json::from_slice(&body).expect("JSON body")
}
