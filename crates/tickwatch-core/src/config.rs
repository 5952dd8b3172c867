//! Configuration shape consumed by the core.
//!
//! The line-oriented config text grammar lives outside this crate; only its
//! output shape is owned here.

use serde::{Deserialize, Serialize};

use crate::ValidationError;

pub const DEFAULT_REFRESH_INTERVAL_MS: i64 = 60_000;
pub const DEFAULT_CODE: &str = "sh000001";

/// Target refresh interval plus the ordered set of instrument codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigData {
    pub refresh_interval_ms: i64,
    pub codes: Vec<String>,
}

impl ConfigData {
    pub fn new(refresh_interval_ms: i64, codes: Vec<String>) -> Result<Self, ValidationError> {
        if refresh_interval_ms < 0 {
            return Err(ValidationError::NegativeRefreshInterval {
                value: refresh_interval_ms,
            });
        }
        Ok(Self {
            refresh_interval_ms,
            codes,
        })
    }
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            codes: vec![String::from(DEFAULT_CODE)],
        }
    }
}
