//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::inbound::http::session_config::SessionSettings;
use backend::outbound::completion::CompletionSettings;
use backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) completion: Option<CompletionSettings>,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            completion: None,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    ///
    /// Without one the server keeps everything in an in-process store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach completion settings; without them every AI call fails with an
    /// upstream error.
    #[must_use]
    pub fn with_completion(mut self, settings: CompletionSettings) -> Self {
        self.completion = Some(settings);
        self
    }
}
