use std::time::Duration;

/// Runtime knobs for one report pipeline.
///
/// The defaults match the production backend; tests override `endpoint` and
/// `retry_delay` to point at a fake server. Environment overrides are read
/// through [`dotenv`], so a local `.env` file works too.
#[derive(Clone, Debug)]
pub struct ReportConfig {
    /// Base REST endpoint, e.g. `http://127.0.0.1:5000/security`.
    pub endpoint: String,

    /// User-Agent header sent with every request.
    pub user_agent: String,

    /// Per-attempt timeout on the GET.
    pub timeout: Duration,

    /// Total GET attempts before the fetch is declared dead.
    pub max_attempts: u32,

    /// Fixed pause between attempts. No backoff growth; the backend is a
    /// single low-QPS collaborator.
    pub retry_delay: Duration,

    /// Minimum number of distinct fiscal years a payload must cover.
    ///
    /// Ten is a product policy choice (enough history to plot a meaningful
    /// series), not a correctness bound.
    pub min_years: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/security".to_string(),
            user_agent: concat!("tenk/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(1),
            max_attempts: 5,
            retry_delay: Duration::from_secs(1),
            min_years: 10,
        }
    }
}

impl ReportConfig {
    /// Defaults, with `TENK_ENDPOINT` and `USER_AGENT` overrides applied
    /// when present in the environment.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(endpoint) = dotenv::var("TENK_ENDPOINT") {
            cfg.endpoint = endpoint;
        }
        if let Ok(user_agent) = dotenv::var("USER_AGENT") {
            cfg.user_agent = user_agent;
        }
        cfg
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
