use serde::{Deserialize, Serialize};
use std::fmt;

/// One year of spatially aggregated ERA5 data for the requested region.
///
/// Values are already unit-converted: temperature in degrees Celsius,
/// precipitation in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualClimate {
    pub year: i32,
    pub tmean_c: f64,
    pub prec_mm: f64,
}

/// Simplified Köppen-Geiger climate class.
///
/// The full taxonomy has ~30 classes driven by monthly statistics; this
/// six-class variant uses annual means and three thresholds only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateClass {
    Et,
    Df,
    Bs,
    Cf,
    Bw,
    Af,
}

impl ClimateClass {
    pub fn code(&self) -> &'static str {
        match self {
            ClimateClass::Et => "ET",
            ClimateClass::Df => "Df",
            ClimateClass::Bs => "BS",
            ClimateClass::Cf => "Cf",
            ClimateClass::Bw => "BW",
            ClimateClass::Af => "Af",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClimateClass::Et => "ET - Tundra",
            ClimateClass::Df => "Df - Continental",
            ClimateClass::Bs => "BS - Semi-arid",
            ClimateClass::Cf => "Cf - Temperate",
            ClimateClass::Bw => "BW - Arid",
            ClimateClass::Af => "Af - Tropical",
        }
    }
}

impl fmt::Display for ClimateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Geometry the spatial reduction is constrained to.
///
/// Polygon rings are `[lon, lat]` pairs, first vertex not repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Region {
    Point { lat: f64, lon: f64 },
    Polygon { ring: Vec<[f64; 2]> },
}

impl Region {
    /// Short identifier used in output filenames.
    pub fn file_tag(&self) -> String {
        match self {
            Region::Point { lat, lon } => format!("{:.4}_{:.4}", lat, lon),
            Region::Polygon { .. } => "region".to_string(),
        }
    }
}

/// A classified year, ready for tabulation and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedYear {
    pub year: i32,
    pub tmean_c: f64,
    pub prec_mm: f64,
    pub class: ClimateClass,
}

/// Period statistics over the classified years.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateSummary {
    pub mean_temp_c: f64,
    pub mean_prec_mm: f64,
    /// Least-squares slope of temperature against year, °C/year.
    pub temp_trend_c_per_year: f64,
    /// Least-squares slope of precipitation against year, mm/year.
    pub prec_trend_mm_per_year: f64,
    /// Classification of the most recent year in the period.
    pub latest_class: ClimateClass,
}

/// Output of the transform phase.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub years: Vec<ClassifiedYear>,
    pub summary: ClimateSummary,
    pub csv_output: String,
}
