use crate::core::classify::{kelvin_to_celsius, metres_to_millimetres};
use crate::domain::model::{AnnualClimate, Region};
use crate::utils::error::{ClimateError, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// First year of ERA5 monthly coverage used by this tool.
pub const ERA5_FIRST_YEAR: i32 = 1979;
/// Last year of ERA5 monthly coverage used by this tool.
pub const ERA5_LAST_YEAR: i32 = 2022;

pub const DEFAULT_DATASET: &str = "ECMWF/ERA5/MONTHLY";
pub const DEFAULT_TEMPERATURE_BAND: &str = "mean_2m_air_temperature";
pub const DEFAULT_PRECIPITATION_BAND: &str = "total_precipitation";
/// ERA5 native resolution, metres per pixel.
pub const DEFAULT_SCALE_M: f64 = 25_000.0;
pub const DEFAULT_MAX_PIXELS: u64 = 1_000_000;

/// Responses are memoized per region and year for one hour.
const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Connection settings for the geospatial compute service.
#[derive(Debug, Clone)]
pub struct Era5Settings {
    pub endpoint: String,
    pub auth_token: Option<String>,
    pub timeout: Option<Duration>,
    pub dataset: String,
    pub temperature_band: String,
    pub precipitation_band: String,
    pub scale_m: f64,
    pub max_pixels: u64,
}

impl Era5Settings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_token: None,
            timeout: None,
            dataset: DEFAULT_DATASET.to_string(),
            temperature_band: DEFAULT_TEMPERATURE_BAND.to_string(),
            precipitation_band: DEFAULT_PRECIPITATION_BAND.to_string(),
            scale_m: DEFAULT_SCALE_M,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// One spatial-statistical aggregation request, one year of one dataset.
#[derive(Debug, Serialize)]
struct ReduceRegionRequest<'a> {
    dataset: &'a str,
    start_date: String,
    end_date: String,
    geometry: &'a Region,
    /// Spatial reducer applied after the per-band temporal reduction.
    reducer: &'static str,
    scale: f64,
    max_pixels: u64,
    bands: Vec<BandSpec<'a>>,
}

#[derive(Debug, Serialize)]
struct BandSpec<'a> {
    name: &'a str,
    temporal: &'static str,
}

/// Band values come back in source units (Kelvin, metres); a band missing
/// from the image stack for the requested window is null.
#[derive(Debug, Deserialize)]
struct ReduceRegionResponse {
    bands: HashMap<String, Option<f64>>,
}

struct CacheEntry {
    fetched_at: Instant,
    value: Option<AnnualClimate>,
}

/// Client for the remote region-reduction service backing the ERA5 queries.
///
/// The service is treated as an opaque oracle: all spatial aggregation,
/// reprojection and image statistics happen on the remote side, this client
/// only converts units and shapes the request.
pub struct Era5Client {
    client: Client,
    settings: Era5Settings,
    cache: Mutex<HashMap<String, CacheEntry>>,
}

impl Era5Client {
    pub fn new(settings: Era5Settings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            settings,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Spatial mean of annual mean temperature and annual total precipitation
    /// over `region` for one year, converted to °C and mm.
    ///
    /// `Ok(None)` means the service answered but had no values for the window
    /// (the no-data condition); any transport or service failure is an error.
    pub async fn annual_means(&self, region: &Region, year: i32) -> Result<Option<AnnualClimate>> {
        let key = self.cache_key(region, year)?;

        {
            let cache = self
                .cache
                .lock()
                .map_err(|_| ClimateError::ProcessingError {
                    message: "response cache poisoned".to_string(),
                })?;
            if let Some(entry) = cache.get(&key) {
                if entry.fetched_at.elapsed() < CACHE_TTL {
                    tracing::debug!("📂 Cache hit for {} year {}", self.settings.dataset, year);
                    return Ok(entry.value.clone());
                }
            }
        }

        let value = self.fetch_annual_means(region, year).await?;

        let mut cache = self
            .cache
            .lock()
            .map_err(|_| ClimateError::ProcessingError {
                message: "response cache poisoned".to_string(),
            })?;
        cache.insert(
            key,
            CacheEntry {
                fetched_at: Instant::now(),
                value: value.clone(),
            },
        );

        Ok(value)
    }

    async fn fetch_annual_means(
        &self,
        region: &Region,
        year: i32,
    ) -> Result<Option<AnnualClimate>> {
        let request = ReduceRegionRequest {
            dataset: &self.settings.dataset,
            start_date: year_date(year, 1, 1)?,
            end_date: year_date(year, 12, 31)?,
            geometry: region,
            reducer: "mean",
            scale: self.settings.scale_m,
            max_pixels: self.settings.max_pixels,
            bands: vec![
                BandSpec {
                    name: &self.settings.temperature_band,
                    temporal: "mean",
                },
                BandSpec {
                    name: &self.settings.precipitation_band,
                    temporal: "sum",
                },
            ],
        };

        tracing::debug!(
            "📡 reduceRegion {} {}..{}",
            self.settings.dataset,
            request.start_date,
            request.end_date
        );

        let mut http_request = self.client.post(&self.settings.endpoint).json(&request);
        if let Some(token) = &self.settings.auth_token {
            http_request = http_request.bearer_auth(token);
        }

        let response = http_request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClimateError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        let body: ReduceRegionResponse = response.json().await?;

        let temp_k = band_value(&body, &self.settings.temperature_band);
        let prec_m = band_value(&body, &self.settings.precipitation_band);

        match (temp_k, prec_m) {
            (Some(temp_k), Some(prec_m)) => Ok(Some(AnnualClimate {
                year,
                tmean_c: kelvin_to_celsius(temp_k),
                prec_mm: metres_to_millimetres(prec_m),
            })),
            _ => {
                tracing::debug!("no band values for year {}", year);
                Ok(None)
            }
        }
    }

    fn cache_key(&self, region: &Region, year: i32) -> Result<String> {
        let geometry = serde_json::to_string(region)?;
        Ok(format!("{}:{}:{}", self.settings.dataset, geometry, year))
    }
}

fn band_value(response: &ReduceRegionResponse, band: &str) -> Option<f64> {
    response.bands.get(band).copied().flatten()
}

fn year_date(year: i32, month: u32, day: u32) -> Result<String> {
    let date =
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ClimateError::ProcessingError {
            message: format!("invalid date {}-{}-{}", year, month, day),
        })?;
    Ok(date.format("%Y-%m-%d").to_string())
}
