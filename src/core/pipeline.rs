use crate::adapters::era5::{Era5Client, ERA5_FIRST_YEAR, ERA5_LAST_YEAR};
use crate::core::classify::classify;
use crate::core::summary::summarize;
use crate::core::{AnalysisResult, AnnualClimate, ClassifiedYear, ConfigProvider, Storage};
use crate::domain::ports::Pipeline;
use crate::utils::error::{ClimateError, Result};
use crate::utils::validation::validate_year_range;

/// Climate analysis as an extract/transform/load pipeline.
///
/// Extract runs the per-year remote aggregation loop, transform classifies
/// and tabulates, load writes the CSV artifact.
pub struct ClimatePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    era5: Era5Client,
}

impl<S: Storage, C: ConfigProvider> ClimatePipeline<S, C> {
    pub fn new(storage: S, config: C, era5: Era5Client) -> Self {
        Self {
            storage,
            config,
            era5,
        }
    }

    fn output_filename(&self) -> String {
        format!(
            "climate_analysis_{}_{}_{}.csv",
            self.config.region().file_tag(),
            self.config.start_year(),
            self.config.end_year()
        )
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ClimatePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<AnnualClimate>> {
        let start_year = self.config.start_year();
        let end_year = self.config.end_year();

        // Rejected before any remote call is issued.
        validate_year_range(start_year, end_year, ERA5_FIRST_YEAR, ERA5_LAST_YEAR)?;

        let region = self.config.region();
        let mut records = Vec::new();

        for year in start_year..=end_year {
            match self.era5.annual_means(&region, year).await? {
                Some(record) => {
                    tracing::debug!(
                        "{}: {:.2} °C, {:.1} mm",
                        record.year,
                        record.tmean_c,
                        record.prec_mm
                    );
                    records.push(record);
                }
                None => tracing::warn!("⚠️ No ERA5 values for year {}", year),
            }
        }

        if records.is_empty() {
            return Err(ClimateError::NoData);
        }

        Ok(records)
    }

    async fn transform(&self, data: Vec<AnnualClimate>) -> Result<AnalysisResult> {
        let years: Vec<ClassifiedYear> = data
            .into_iter()
            .map(|record| ClassifiedYear {
                year: record.year,
                tmean_c: record.tmean_c,
                prec_mm: record.prec_mm,
                class: classify(record.tmean_c, record.prec_mm),
            })
            .collect();

        let summary = summarize(&years).ok_or(ClimateError::NoData)?;

        tracing::info!("🌡️ Mean temperature: {:.1} °C", summary.mean_temp_c);
        tracing::info!("🌧️ Mean precipitation: {:.0} mm", summary.mean_prec_mm);
        tracing::info!(
            "📈 Temperature trend: {:+.3} °C/year",
            summary.temp_trend_c_per_year
        );
        tracing::info!(
            "📊 Precipitation trend: {:+.1} mm/year",
            summary.prec_trend_mm_per_year
        );
        tracing::info!("🌍 Climate type: {}", summary.latest_class);

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["year", "tmean_annual", "prec_annual", "climate_type"])?;
        for year in &years {
            writer.write_record([
                year.year.to_string(),
                format!("{:.2}", year.tmean_c),
                format!("{:.1}", year.prec_mm),
                year.class.label().to_string(),
            ])?;
        }

        let csv_bytes = writer
            .into_inner()
            .map_err(|e| ClimateError::ProcessingError {
                message: format!("finalizing CSV output: {}", e),
            })?;
        let csv_output =
            String::from_utf8(csv_bytes).map_err(|e| ClimateError::ProcessingError {
                message: format!("CSV output is not valid UTF-8: {}", e),
            })?;

        Ok(AnalysisResult {
            years,
            summary,
            csv_output,
        })
    }

    async fn load(&self, result: AnalysisResult) -> Result<String> {
        let filename = self.output_filename();

        tracing::debug!(
            "Writing {} rows to {}",
            result.years.len(),
            filename
        );
        self.storage
            .write_file(&filename, result.csv_output.as_bytes())
            .await?;

        Ok(format!("{}/{}", self.config.output_path(), filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::era5::Era5Settings;
    use crate::domain::model::Region;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ClimateError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_endpoint: String,
        start_year: i32,
        end_year: i32,
    }

    impl MockConfig {
        fn new(api_endpoint: String, start_year: i32, end_year: i32) -> Self {
            Self {
                api_endpoint,
                start_year,
                end_year,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn auth_token(&self) -> Option<&str> {
            None
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn region(&self) -> Region {
            Region::Point {
                lat: 51.1784,
                lon: -115.5708,
            }
        }

        fn start_year(&self) -> i32 {
            self.start_year
        }

        fn end_year(&self) -> i32 {
            self.end_year
        }
    }

    fn pipeline_for(
        server: &MockServer,
        start_year: i32,
        end_year: i32,
    ) -> (MockStorage, ClimatePipeline<MockStorage, MockConfig>) {
        let endpoint = server.url("/v1/reduce-region");
        let storage = MockStorage::new();
        let config = MockConfig::new(endpoint.clone(), start_year, end_year);
        let era5 = Era5Client::new(Era5Settings::new(endpoint)).unwrap();
        (storage.clone(), ClimatePipeline::new(storage, config, era5))
    }

    fn bands(temp_k: f64, prec_m: f64) -> serde_json::Value {
        serde_json::json!({
            "bands": {
                "mean_2m_air_temperature": temp_k,
                "total_precipitation": prec_m,
            }
        })
    }

    #[tokio::test]
    async fn test_extract_one_request_per_year() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/reduce-region");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(bands(276.15, 0.45));
        });

        let (_storage, pipeline) = pipeline_for(&server, 2019, 2021);
        let records = pipeline.extract().await.unwrap();

        assert_eq!(api_mock.hits(), 3);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].year, 2019);
        assert_eq!(records[2].year, 2021);
        assert!((records[0].tmean_c - 3.0).abs() < 1e-9);
        assert!((records[0].prec_mm - 450.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_extract_rejects_inverted_range_before_any_call() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/reduce-region");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(bands(276.15, 0.45));
        });

        let (_storage, pipeline) = pipeline_for(&server, 2021, 2019);
        let err = pipeline.extract().await.unwrap_err();

        assert!(matches!(err, ClimateError::ValidationError { .. }));
        assert_eq!(api_mock.hits(), 0);
    }

    #[tokio::test]
    async fn test_extract_rejects_years_outside_coverage() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/reduce-region");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(bands(276.15, 0.45));
        });

        let (_storage, pipeline) = pipeline_for(&server, 1950, 1960);
        assert!(pipeline.extract().await.is_err());
        assert_eq!(api_mock.hits(), 0);
    }

    #[tokio::test]
    async fn test_extract_service_failure_aborts_batch() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/reduce-region");
            then.status(500).body("internal error");
        });

        let (_storage, pipeline) = pipeline_for(&server, 2019, 2021);
        let err = pipeline.extract().await.unwrap_err();

        assert!(matches!(err, ClimateError::ServiceError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_extract_all_null_years_is_no_data() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/reduce-region");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "bands": {
                        "mean_2m_air_temperature": null,
                        "total_precipitation": null,
                    }
                }));
        });

        let (_storage, pipeline) = pipeline_for(&server, 2019, 2020);
        let err = pipeline.extract().await.unwrap_err();

        assert!(matches!(err, ClimateError::NoData));
    }

    #[tokio::test]
    async fn test_transform_classifies_and_tabulates() {
        let server = MockServer::start();
        let (_storage, pipeline) = pipeline_for(&server, 2020, 2022);

        let input = vec![
            AnnualClimate {
                year: 2020,
                tmean_c: -5.0,
                prec_mm: 300.0,
            },
            AnnualClimate {
                year: 2021,
                tmean_c: 10.0,
                prec_mm: 700.0,
            },
            AnnualClimate {
                year: 2022,
                tmean_c: 25.0,
                prec_mm: 200.0,
            },
        ];

        let result = pipeline.transform(input).await.unwrap();

        assert_eq!(result.years.len(), 3);
        assert_eq!(result.years[0].class.code(), "ET");
        assert_eq!(result.years[1].class.code(), "Cf");
        assert_eq!(result.years[2].class.code(), "BW");
        assert_eq!(result.summary.latest_class.code(), "BW");

        let lines: Vec<&str> = result.csv_output.trim_end().split('\n').collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "year,tmean_annual,prec_annual,climate_type");
        assert_eq!(lines[1], "2020,-5.00,300.0,ET - Tundra");
        assert_eq!(lines[3], "2022,25.00,200.0,BW - Arid");
    }

    #[tokio::test]
    async fn test_transform_empty_input_is_no_data() {
        let server = MockServer::start();
        let (_storage, pipeline) = pipeline_for(&server, 2020, 2022);

        let err = pipeline.transform(Vec::new()).await.unwrap_err();
        assert!(matches!(err, ClimateError::NoData));
    }

    #[tokio::test]
    async fn test_load_writes_named_csv() {
        let server = MockServer::start();
        let (storage, pipeline) = pipeline_for(&server, 2010, 2022);

        let years = vec![ClassifiedYear {
            year: 2010,
            tmean_c: 2.0,
            prec_mm: 450.0,
            class: classify(2.0, 450.0),
        }];
        let summary = summarize(&years).unwrap();
        let result = AnalysisResult {
            years,
            summary,
            csv_output: "year,tmean_annual,prec_annual,climate_type\n2010,2.00,450.0,BS - Semi-arid\n".to_string(),
        };

        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(
            output_path,
            "test_output/climate_analysis_51.1784_-115.5708_2010_2022.csv"
        );

        let written = storage
            .get_file("climate_analysis_51.1784_-115.5708_2010_2022.csv")
            .await
            .unwrap();
        let content = String::from_utf8(written).unwrap();
        assert!(content.starts_with("year,tmean_annual,prec_annual,climate_type"));
        assert!(content.contains("BS - Semi-arid"));
    }
}
