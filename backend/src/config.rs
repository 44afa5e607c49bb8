#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Database connection string.
    pub database_url: String,

    // =========================
    // Collaborator endpoints
    // =========================
    /// Listing endpoint of the feed-inventory service.
    ///
    /// The client fetches the full listing and filters by feed id; the
    /// upstream service does not expose a by-id route.
    pub feed_service_url: String,

    /// Listing endpoint of the flock directory service.
    ///
    /// Same listing + filter contract as the feed service. Flocks with an
    /// arrival date in the future are treated as absent.
    pub flock_service_url: String,

    /// Upper bound on any single collaborator lookup, in milliseconds.
    ///
    /// A lookup that exceeds this fails the whole operation. Nothing is
    /// persisted in that case: writes only happen after both lookups and
    /// validation succeed.
    pub lookup_timeout_ms: u64,

    // =========================
    // HTTP server
    // =========================
    /// Bind address for the HTTP API.
    pub http_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://feedcost_dev.db".to_string());

        let feed_service_url = std::env::var("FEED_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8085/api/foods".to_string());

        let flock_service_url = std::env::var("FLOCK_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8086/api/hens".to_string());

        let lookup_timeout_ms = std::env::var("LOOKUP_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5_000);

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Self {
            database_url,
            feed_service_url,
            flock_service_url,
            lookup_timeout_ms,
            http_addr,
        }
    }
}
