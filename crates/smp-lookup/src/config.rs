//! Reader configuration.

use serde::{Deserialize, Serialize};

/// Reader configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Largest response body a reader will drain.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: u64,

    /// Reject service metadata that is not signed.
    #[serde(default)]
    pub require_signature: bool,
}

fn default_max_response_bytes() -> u64 {
    10 * 1024 * 1024
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_response_bytes: default_max_response_bytes(),
            require_signature: false,
        }
    }
}

impl ReaderConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `SMP_READER_MAX_RESPONSE_BYTES` | Response size limit (default: 10 MiB) |
    /// | `SMP_READER_REQUIRE_SIGNATURE` | Reject unsigned service metadata |
    pub fn from_env() -> Self {
        Self {
            max_response_bytes: std::env::var("SMP_READER_MAX_RESPONSE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_response_bytes),
            require_signature: std::env::var("SMP_READER_REQUIRE_SIGNATURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Set the response size limit.
    pub fn with_max_response_bytes(mut self, limit: u64) -> Self {
        self.max_response_bytes = limit;
        self
    }

    /// Require signed service metadata.
    pub fn with_require_signature(mut self, require: bool) -> Self {
        self.require_signature = require;
        self
    }
}
