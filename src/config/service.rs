use crate::adapters::era5::Era5Settings;
use crate::utils::error::{ClimateError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// TOML configuration for the geospatial compute service.
///
/// Values set here override the command-line endpoint and token, so one file
/// can carry deployment-specific settings (proxy URL, dataset overrides)
/// while the coordinates stay on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service: ServiceSection,
    pub dataset: Option<DatasetSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSection {
    pub endpoint: String,
    pub auth_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSection {
    pub name: Option<String>,
    pub temperature_band: Option<String>,
    pub precipitation_band: Option<String>,
    pub scale_m: Option<f64>,
    pub max_pixels: Option<u64>,
}

impl ServiceConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClimateError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClimateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value, so tokens do not
    /// have to live in the file.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClimateError::ProcessingError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlays this config onto command-line derived settings.
    pub fn apply(&self, mut settings: Era5Settings) -> Era5Settings {
        settings.endpoint = self.service.endpoint.clone();
        if let Some(token) = &self.service.auth_token {
            settings.auth_token = Some(token.clone());
        }
        if let Some(seconds) = self.service.timeout_seconds {
            settings.timeout = Some(Duration::from_secs(seconds));
        }

        if let Some(dataset) = &self.dataset {
            if let Some(name) = &dataset.name {
                settings.dataset = name.clone();
            }
            if let Some(band) = &dataset.temperature_band {
                settings.temperature_band = band.clone();
            }
            if let Some(band) = &dataset.precipitation_band {
                settings.precipitation_band = band.clone();
            }
            if let Some(scale) = dataset.scale_m {
                settings.scale_m = scale;
            }
            if let Some(max_pixels) = dataset.max_pixels {
                settings.max_pixels = max_pixels;
            }
        }

        settings
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service.endpoint", &self.service.endpoint)?;

        if let Some(dataset) = &self.dataset {
            if let Some(scale) = dataset.scale_m {
                validate_range("dataset.scale_m", scale, 1.0, 500_000.0)?;
            }
        }

        Ok(())
    }
}
