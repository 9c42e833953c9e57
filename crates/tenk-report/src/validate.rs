use crate::error::ValidationError;
use crate::fetch::RawPayload;
use tracing::trace;

/// Reject payloads with too little history to chart meaningfully.
///
/// The backend serves one entry per fiscal year; anything below `min_years`
/// is treated as a bad or partial response rather than a real data
/// shortage. Field contents are not inspected here.
pub fn validate(payload: &RawPayload, min_years: usize) -> Result<(), ValidationError> {
    if payload.is_empty() {
        return Err(ValidationError::Empty);
    }

    let got = payload.len();
    if got < min_years {
        return Err(ValidationError::TooFewYears {
            got,
            need: min_years,
        });
    }

    trace!("payload accepted with {got} year(s)");
    Ok(())
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
