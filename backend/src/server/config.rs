//! HTTP server configuration object.

use jokes::inbound::http::session_codec::SessionCodec;
use jokes::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) codec: SessionCodec,
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(codec: SessionCodec, bind_addr: (String, u16)) -> Self {
        Self {
            codec,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database pool; without one the in-memory store is used.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
