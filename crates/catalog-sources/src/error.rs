use thiserror::Error;

/// Failure talking to the catalog service.
///
/// An empty result set is never an error; it decodes to an empty page.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Network, timeout or non-2xx failures
    pub fn is_transport(&self) -> bool {
        matches!(self, CatalogError::Transport { .. } | CatalogError::Status { .. })
    }

    /// Non-JSON bodies or schema mismatches
    pub fn is_decode(&self) -> bool {
        matches!(self, CatalogError::Decode { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let decode = CatalogError::decode("anime/top", "expected value at line 1");
        assert!(decode.is_decode());
        assert!(!decode.is_transport());

        let status = CatalogError::Status {
            endpoint: "anime/99/details".to_string(),
            status: 404,
            body: String::new(),
        };
        assert!(status.is_transport());
        assert!(status.is_not_found());
        assert_eq!(status.to_string(), "anime/99/details returned HTTP 404: ");
    }
}
