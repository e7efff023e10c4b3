use thiserror::Error;

/// Errors raised while collecting a single metric source.
///
/// The runner collapses every variant into one "collector failed" outcome;
/// the display text becomes the diagnostic reason.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("missing credential: {name}")]
    MissingCredential { name: &'static str },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed {origin} response: {reason}")]
    Decode { origin: &'static str, reason: String },

    #[error("failed to parse {field}: {reason}")]
    Parse { field: &'static str, reason: String },

    #[error("no element matched selector {selector}")]
    Scrape { selector: &'static str },

    #[error("{origin} returned no results")]
    EmptyResult { origin: &'static str },

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CollectorError {
    pub fn decode(origin: &'static str, reason: impl ToString) -> Self {
        Self::Decode {
            origin,
            reason: reason.to_string(),
        }
    }

    pub fn parse(field: &'static str, reason: impl ToString) -> Self {
        Self::Parse {
            field,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_formatting() {
        let error = CollectorError::Status {
            url: "https://api.github.com/repos/o/r".to_string(),
            status: 403,
        };

        let msg = error.to_string();
        assert!(msg.contains("api.github.com"));
        assert!(msg.contains("403"));
    }

    #[test]
    fn test_missing_credential_names_variable() {
        let error = CollectorError::MissingCredential {
            name: "DISCORD_TOKEN",
        };
        assert_eq!(error.to_string(), "missing credential: DISCORD_TOKEN");
    }

    #[test]
    fn test_decode_helper() {
        let error = CollectorError::decode("pypistats", "missing field `data`");
        assert_eq!(
            error.to_string(),
            "malformed pypistats response: missing field `data`"
        );
    }
}
