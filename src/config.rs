//! Benchmark configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for benchmark runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Output directory for results and the report
    pub output_dir: PathBuf,

    /// Cap on the number of documents processed in directory mode
    pub max_files: Option<usize>,

    /// Timeout for each MCP server extraction
    pub mcp_timeout: Duration,

    /// Explicit MCP server binary, overriding discovery
    pub mcp_server: Option<PathBuf>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("results"),
            max_files: None,
            mcp_timeout: Duration::from_secs(60),
            mcp_server: None,
        }
    }
}

impl BenchmarkConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if any configuration value is invalid
    pub fn validate(&self) -> crate::Result<()> {
        if self.mcp_timeout.as_secs() == 0 && self.mcp_timeout.subsec_nanos() == 0 {
            return Err(crate::Error::Config("Timeout must be > 0".to_string()));
        }

        if self.max_files == Some(0) {
            return Err(crate::Error::Config("max_files must be > 0".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BenchmarkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert_eq!(config.mcp_timeout, Duration::from_secs(60));
        assert!(config.max_files.is_none());
        assert!(config.mcp_server.is_none());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = BenchmarkConfig {
            mcp_timeout: Duration::from_secs(0),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Timeout"));
    }

    #[test]
    fn test_zero_max_files_rejected() {
        let config = BenchmarkConfig {
            max_files: Some(0),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_files"));
    }

    #[test]
    fn test_subsecond_timeout_is_valid() {
        let config = BenchmarkConfig {
            mcp_timeout: Duration::from_millis(250),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
