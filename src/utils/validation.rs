use crate::utils::error::{ClimateError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ClimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ClimateError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ClimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ClimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ClimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ClimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Checks the requested year window before any remote call is issued.
///
/// Equal start and end years are allowed (a one-year analysis); an inverted
/// range is rejected.
pub fn validate_year_range(
    start_year: i32,
    end_year: i32,
    coverage_first: i32,
    coverage_last: i32,
) -> Result<()> {
    if start_year > end_year {
        return Err(ClimateError::ValidationError {
            message: format!(
                "start year {} is after end year {}",
                start_year, end_year
            ),
        });
    }

    validate_range("start_year", start_year, coverage_first, coverage_last)?;
    validate_range("end_year", end_year, coverage_first, coverage_last)?;

    Ok(())
}

pub fn validate_latitude(field_name: &str, lat: f64) -> Result<()> {
    validate_range(field_name, lat, -90.0, 90.0)
}

pub fn validate_longitude(field_name: &str, lon: f64) -> Result<()> {
    validate_range(field_name, lon, -180.0, 180.0)
}
