//! Facade configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, ErrorContext, Result};

/// Default name of the reserved raw-instance accessor.
pub const DEFAULT_RAW_ACCESSOR: &str = "instance";

fn default_raw_accessor() -> Option<String> {
    Some(DEFAULT_RAW_ACCESSOR.to_string())
}

/// Settings for one facade handle.
///
/// ```yaml
/// name: Table
/// raw_accessor: instance   # or null to forward every name
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacadeConfig {
    /// Diagnostic name used in "not mounted" errors. May be empty.
    #[serde(default)]
    pub name: String,
    /// Property name that returns the raw instance instead of a forwarder.
    /// `None` disables the accessor.
    #[serde(default = "default_raw_accessor")]
    pub raw_accessor: Option<String>,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            raw_accessor: default_raw_accessor(),
        }
    }
}

impl FacadeConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_raw_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.raw_accessor = Some(accessor.into());
        self
    }

    pub fn without_raw_accessor(mut self) -> Self {
        self.raw_accessor = None;
        self
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text).map_err(|e| {
            Error::configuration_with_context(
                "failed to parse facade config",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("facade_config"),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| {
            Error::configuration_with_context(
                "failed to parse facade config",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("facade_config"),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(accessor) = &self.raw_accessor {
            if accessor.trim().is_empty() {
                return Err(Error::configuration_with_context(
                    "raw accessor name must not be empty",
                    ErrorContext::new()
                        .with_field_path("raw_accessor")
                        .with_details("use null to disable the accessor")
                        .with_source("facade_config"),
                ));
            }
        }
        Ok(())
    }
}
