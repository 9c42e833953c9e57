pub mod chart;
pub mod config;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod listing;
pub mod table;
pub mod validate;

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use reqwest::Client as HttpClient;
}

/// Readable elapsed-time suffix for log lines.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.2}s", time.elapsed().as_secs_f64())
}
