pub mod service;
pub mod storage;

use crate::adapters::era5::{Era5Settings, ERA5_FIRST_YEAR, ERA5_LAST_YEAR};
use crate::core::ConfigProvider;
use crate::domain::model::Region;
use crate::utils::error::{ClimateError, Result};
use crate::utils::validation::{
    self, validate_latitude, validate_longitude, validate_path, validate_url,
    validate_year_range, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "climate-etl")]
#[command(about = "Köppen-Geiger climate analysis over ECMWF ERA5 reanalysis data")]
pub struct CliConfig {
    /// Region-reduction endpoint of the geospatial compute service.
    #[arg(long, default_value = "http://localhost:8080/v1/reduce-region")]
    pub api_endpoint: String,

    /// Bearer token for the geospatial compute service.
    #[arg(long)]
    pub auth_token: Option<String>,

    #[arg(long, default_value = "51.1784")]
    pub lat: f64,

    #[arg(long, default_value = "-115.5708")]
    pub lon: f64,

    /// Polygon vertices as lon,lat pairs; switches from point to region mode.
    #[arg(long, value_delimiter = ',')]
    pub polygon: Vec<f64>,

    #[arg(long, default_value = "2010")]
    pub start_year: i32,

    #[arg(long, default_value = "2022")]
    pub end_year: i32,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Optional TOML service configuration file.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Base client settings from the command line; a TOML service config can
    /// still override these.
    pub fn era5_settings(&self) -> Era5Settings {
        let mut settings = Era5Settings::new(self.api_endpoint.clone());
        settings.auth_token = self.auth_token.clone();
        settings
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn region(&self) -> Region {
        if self.polygon.is_empty() {
            Region::Point {
                lat: self.lat,
                lon: self.lon,
            }
        } else {
            let ring = self
                .polygon
                .chunks_exact(2)
                .map(|pair| [pair[0], pair[1]])
                .collect();
            Region::Polygon { ring }
        }
    }

    fn start_year(&self) -> i32 {
        self.start_year
    }

    fn end_year(&self) -> i32 {
        self.end_year
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_path("output_path", &self.output_path)?;
        validate_year_range(
            self.start_year,
            self.end_year,
            ERA5_FIRST_YEAR,
            ERA5_LAST_YEAR,
        )?;

        if self.polygon.is_empty() {
            validate_latitude("lat", self.lat)?;
            validate_longitude("lon", self.lon)?;
        } else {
            if self.polygon.len() % 2 != 0 {
                return Err(ClimateError::InvalidConfigValueError {
                    field: "polygon".to_string(),
                    value: format!("{} values", self.polygon.len()),
                    reason: "Polygon needs an even number of values (lon,lat pairs)".to_string(),
                });
            }
            if self.polygon.len() < 6 {
                return Err(ClimateError::InvalidConfigValueError {
                    field: "polygon".to_string(),
                    value: format!("{} values", self.polygon.len()),
                    reason: "Polygon needs at least three vertices".to_string(),
                });
            }
            for pair in self.polygon.chunks_exact(2) {
                validate_longitude("polygon", pair[0])?;
                validate_latitude("polygon", pair[1])?;
            }
        }

        if let Some(token) = &self.auth_token {
            validation::validate_non_empty_string("auth_token", token)?;
        }

        Ok(())
    }
}
