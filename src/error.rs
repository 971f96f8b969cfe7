use std::fmt;

/// Custom error type for Terraform API client operations
#[derive(Debug)]
pub enum TfeError {
    /// HTTP request failed before a response was received
    Http(reqwest::Error),
    /// API returned an error response (4xx/5xx)
    Api { status: u16, message: String },
    /// Token not provided as argument nor found in the environment
    MissingToken(String),
    /// Operation requires an organization but none is set
    MissingOrganization,
    /// Operation requires a workspace but none is set or given
    MissingWorkspace,
    /// Unsupported query parameter or enumerated argument value
    InvalidQueryParam {
        param: String,
        value: String,
        valid: Vec<String>,
    },
    /// JSON parsing error or missing member in a JSON document
    Json(String),
    /// Configuration error
    Config(String),
    /// Local file could not be read or written
    Io { message: String },
}

impl TfeError {
    /// Build an `InvalidQueryParam` error
    pub fn invalid_param(param: &str, value: &str, valid: &[&str]) -> Self {
        TfeError::InvalidQueryParam {
            param: param.to_string(),
            value: value.to_string(),
            valid: valid.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            TfeError::Api { status, .. } => Some(*status),
            TfeError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for errors raised before any network call (configuration and validation)
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            TfeError::MissingToken(_)
                | TfeError::MissingOrganization
                | TfeError::MissingWorkspace
                | TfeError::InvalidQueryParam { .. }
                | TfeError::Config(_)
        )
    }
}

impl fmt::Display for TfeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TfeError::Http(e) => write!(f, "HTTP request failed: {}", e),
            TfeError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            TfeError::MissingToken(msg) => write!(f, "{}", msg),
            TfeError::MissingOrganization => write!(
                f,
                "An organization is required. Set TFE_ORG or pass an organization to the client."
            ),
            TfeError::MissingWorkspace => {
                write!(f, "A workspace name or ID is required for this operation.")
            }
            TfeError::InvalidQueryParam {
                param,
                value,
                valid,
            } => {
                if valid.is_empty() {
                    write!(f, "Invalid value '{}' for parameter '{}'", value, param)
                } else {
                    write!(
                        f,
                        "Invalid value '{}' for parameter '{}'. Valid values: {}",
                        value,
                        param,
                        valid.join(", ")
                    )
                }
            }
            TfeError::Json(msg) => write!(f, "JSON error: {}", msg),
            TfeError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TfeError::Io { message } => write!(f, "I/O error: {}", message),
        }
    }
}

impl std::error::Error for TfeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TfeError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TfeError {
    fn from(err: reqwest::Error) -> Self {
        TfeError::Http(err)
    }
}

impl From<serde_json::Error> for TfeError {
    fn from(err: serde_json::Error) -> Self {
        TfeError::Json(err.to_string())
    }
}

impl From<std::io::Error> for TfeError {
    fn from(err: std::io::Error) -> Self {
        TfeError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type alias for Terraform API client operations
pub type Result<T> = std::result::Result<T, TfeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_display() {
        let err = TfeError::MissingToken("no token for app.terraform.io".to_string());
        assert!(err.to_string().contains("app.terraform.io"));
    }

    #[test]
    fn test_api_error_display() {
        let err = TfeError::Api {
            status: 422,
            message: "Name has already been taken".to_string(),
        };
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("Name has already been taken"));
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TfeError>();
    }

    #[test]
    fn test_missing_scope_display() {
        assert!(TfeError::MissingOrganization
            .to_string()
            .contains("organization"));
        assert!(TfeError::MissingWorkspace.to_string().contains("workspace"));
    }

    #[test]
    fn test_invalid_param_display() {
        let err = TfeError::invalid_param("include", "plans", &["run", "run.workspace"]);
        let msg = err.to_string();
        assert!(msg.contains("'plans'"));
        assert!(msg.contains("'include'"));
        assert!(msg.contains("run, run.workspace"));

        let err = TfeError::invalid_param("filters", "names=x", &[]);
        assert!(!err.to_string().contains("Valid values"));
    }

    #[test]
    fn test_precondition_classification() {
        assert!(TfeError::MissingOrganization.is_precondition());
        assert!(TfeError::MissingWorkspace.is_precondition());
        assert!(TfeError::Config("x".to_string()).is_precondition());
        assert!(!TfeError::Api {
            status: 500,
            message: "boom".to_string()
        }
        .is_precondition());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: TfeError = json_err.into();
        match err {
            TfeError::Json(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected TfeError::Json"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TfeError = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_error_source_non_http() {
        use std::error::Error;
        let err = TfeError::Api {
            status: 500,
            message: "Server error".to_string(),
        };
        assert!(err.source().is_none());
    }
}
