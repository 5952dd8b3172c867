use thiserror::Error;

/// Instrument-code validation errors exposed by `tickwatch-core`.
///
/// Reported synchronously to the caller (dialog/config layer) and never
/// retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("instrument code cannot be empty")]
    EmptyCode,

    #[error("equity code must be exactly 8 characters (e.g. sh600000, sz000001): '{value}'")]
    EquityCodeLength { value: String },
    #[error("equity code must end with six digits: '{value}'")]
    EquityCodeDigits { value: String },

    #[error("futures code must separate root and tenor with '-' (e.g. IC-Front, IF-Next): '{value}'")]
    FuturesCodeShape { value: String },
    #[error("futures tenor must be Front or Next: '{value}'")]
    FuturesCodeTenor { value: String },

    #[error("code must start with sh/sz (equity), IH/IF/IC/IM (futures), or test (synthetic): '{value}'")]
    UnknownCodeFamily { value: String },

    #[error("refresh interval must be non-negative: {value}")]
    NegativeRefreshInterval { value: i64 },
}

/// Fetch-path error classification.
///
/// `Network` and `Parse` are non-fatal: the affected instrument simply keeps
/// its previous sample and the next tick retries unconditionally.
/// `Configuration` is fatal at construction time and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {message}")]
    Network { message: String },
    #[error("parse error: {message}")]
    Parse { message: String },
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub const fn retryable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Parse { .. } => true,
            Self::Configuration { .. } => false,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Network { .. } => "fetch.network",
            Self::Parse { .. } => "fetch.parse",
            Self::Configuration { .. } => "fetch.configuration",
        }
    }
}

/// Top-level error type for core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_and_parse_are_retryable() {
        assert!(FetchError::network("timed out").retryable());
        assert!(FetchError::parse("missing quotes").retryable());
        assert!(!FetchError::configuration("unknown kind").retryable());
    }

    #[test]
    fn stable_error_codes() {
        assert_eq!(FetchError::parse("x").code(), "fetch.parse");
        assert_eq!(FetchError::configuration("x").code(), "fetch.configuration");
    }
}
