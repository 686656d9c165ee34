//! Liveness and readiness probes.
//!
//! Both probes live outside `/api/v1` and never touch the session. Readiness
//! turns green once startup has finished and, when a dependency check is
//! attached, only while that check passes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use async_trait::async_trait;
use tracing::warn;

/// Dependency check consulted by the readiness probe.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    /// Return a short reason when the dependency cannot serve traffic.
    async fn check(&self) -> Result<(), String>;
}

/// Shared probe state.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    dependency: Option<Arc<dyn ReadinessCheck>>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            dependency: None,
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a dependency that must pass before the service reports ready.
    #[must_use]
    pub fn with_dependency(mut self, dependency: Arc<dyn ReadinessCheck>) -> Self {
        self.dependency = Some(dependency);
        self
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Startup flag plus the attached dependency check, if any.
    pub async fn is_ready(&self) -> bool {
        if !self.ready.load(Ordering::Acquire) {
            return false;
        }
        match &self.dependency {
            Some(dependency) => match dependency.check().await {
                Ok(()) => true,
                Err(reason) => {
                    warn!(%reason, "readiness dependency check failed");
                    false
                }
            },
            None => true,
        }
    }
}

fn probe_response(probe_ok: bool) -> HttpResponse {
    let mut response = if probe_ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is starting or storage is unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready().await)
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}
