use crate::config::ReportConfig;
use crate::error::{FetchFailure, ReportError};
use crate::http::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, error, trace, warn};

/// Identity of one fetch/validate/build cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    /// SEC filing category, e.g. `10-k`.
    pub form_type: String,
    /// Ticker symbol, e.g. `MSFT`.
    pub symbol: String,
}

impl Query {
    pub fn new(form_type: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            form_type: form_type.into(),
            symbol: symbol.into(),
        }
    }
}

// input
// =====
//
// {
//     "2015": { "Assets": 176223.0, "Liabilities": 96140.0, ... },
//     "2016": { "Assets": 193694.0, ... },
//     ...
// }
//
// One entry per fiscal year; the ordered map keeps year iteration
// deterministic all the way through to the chart axes.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawPayload(pub(crate) BTreeMap<String, BTreeMap<String, f64>>);

impl RawPayload {
    /// Number of distinct fiscal years in the response.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// GETs one filing dataset per query, retrying transient failures up to the
/// configured attempt bound with a fixed inter-attempt delay.
pub struct FetchClient {
    client: HttpClient,
    cfg: ReportConfig,
}

impl FetchClient {
    pub fn new(cfg: ReportConfig) -> Self {
        let client = reqwest::ClientBuilder::new()
            .user_agent(cfg.user_agent.as_str())
            .timeout(cfg.timeout)
            .build()
            .expect("failed to build reqwest client");
        Self { client, cfg }
    }

    /// Fetch `<endpoint>/<form_type>/<symbol>/` and deserialize the body.
    ///
    /// Terminal failure is [`ReportError::Network`] carrying the attempt
    /// count and the last per-attempt cause; callers must treat it as fatal
    /// for the request.
    pub async fn fetch(&self, query: &Query) -> Result<RawPayload, ReportError> {
        let url = self.target(query)?;

        let mut attempts = 0;
        loop {
            attempts += 1;
            trace!(
                "attempt {attempts}/{} for [{}] {}",
                self.cfg.max_attempts,
                query.symbol,
                query.form_type
            );

            match self.attempt(&url).await {
                Ok(payload) => {
                    debug!(
                        "fetched {} year(s) for [{}] {}",
                        payload.len(),
                        query.symbol,
                        query.form_type
                    );
                    return Ok(payload);
                }
                Err(cause) if cause.is_transient() && attempts < self.cfg.max_attempts => {
                    warn!(
                        "attempt {attempts} failed for [{}], error({cause}); retrying ...",
                        query.symbol
                    );
                    tokio::time::sleep(self.cfg.retry_delay).await;
                }
                Err(cause) => {
                    error!(
                        "giving up on [{}] after {attempts} attempt(s), error({cause})",
                        query.symbol
                    );
                    return Err(ReportError::Network { attempts, cause });
                }
            }
        }
    }

    // The target is rebuilt per query; an unparseable one is a configuration
    // error and surfaces before any request is sent (attempts stays 0).
    fn target(&self, query: &Query) -> Result<reqwest::Url, ReportError> {
        let raw = format!(
            "{endpoint}/{form_type}/{symbol}/",
            endpoint = self.cfg.endpoint.trim_end_matches('/'),
            form_type = query.form_type,
            symbol = query.symbol.to_lowercase(),
        );
        reqwest::Url::parse(&raw).map_err(|err| {
            error!("refusing malformed request target \"{raw}\", error({err})");
            ReportError::Network {
                attempts: 0,
                cause: FetchFailure::MalformedTarget(raw),
            }
        })
    }

    async fn attempt(&self, url: &reqwest::Url) -> Result<RawPayload, FetchFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchFailure::classify)?
            .error_for_status()
            .map_err(FetchFailure::classify)?;

        response.json().await.map_err(FetchFailure::classify)
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
