use thiserror::Error;

/// Tagged outcome of a single GET attempt.
///
/// Classifying attempts up front keeps the retry policy a plain predicate
/// over this enum instead of a type-inspection of [`reqwest::Error`].
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("http status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("malformed request target: {0}")]
    MalformedTarget(String),
}

impl FetchFailure {
    /// Whether another attempt is worth making.
    ///
    /// Timeouts, refused/reset connections and HTTP error statuses are
    /// transient. A malformed target is a configuration error, and a body
    /// that fails to decode will not improve on a re-request.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchFailure::Timeout | FetchFailure::Connection(_) | FetchFailure::HttpStatus(_)
        )
    }

    pub(crate) fn classify(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchFailure::Timeout
        } else if let Some(status) = err.status() {
            FetchFailure::HttpStatus(status)
        } else if err.is_decode() {
            FetchFailure::Decode(err.to_string())
        } else {
            FetchFailure::Connection(err.to_string())
        }
    }
}

/// Everything the report pipeline can surface to a caller.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The backend never produced a usable response within the retry bound.
    /// `attempts` is 0 exactly when the target itself was malformed and no
    /// request was ever sent.
    #[error("fetch gave up after {attempts} attempt(s): {cause}")]
    Network { attempts: u32, cause: FetchFailure },

    /// The backend answered, but the payload is unusable.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested column is not present in the table. Local to one
    /// chart; sibling charts of the same report are unaffected.
    #[error("field `{0}` not found in table")]
    FieldNotFound(String),
}

/// Payload-shape rejections, distinct from [`ReportError::Network`] because
/// the backend did answer.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("payload is empty")]
    Empty,

    #[error("payload covers {got} year(s), need at least {need}")]
    TooFewYears { got: usize, need: usize },
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
