use crate::domain::model::ClimateClass;

/// ERA5 ships 2m air temperature in Kelvin.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - 273.15
}

/// ERA5 ships total precipitation in metres of water equivalent.
pub fn metres_to_millimetres(metres: f64) -> f64 {
    metres * 1000.0
}

/// Simplified Köppen-Geiger classification from annual statistics.
///
/// Temperature intervals are closed-open: exactly -3 °C falls into the
/// temperate/semi-arid branch, exactly 18 °C into the tropical/arid branch.
pub fn classify(tmean_c: f64, prec_mm: f64) -> ClimateClass {
    if tmean_c < -3.0 {
        if prec_mm < 400.0 {
            ClimateClass::Et
        } else {
            ClimateClass::Df
        }
    } else if tmean_c < 18.0 {
        if prec_mm < 500.0 {
            ClimateClass::Bs
        } else {
            ClimateClass::Cf
        }
    } else if prec_mm < 600.0 {
        ClimateClass::Bw
    } else {
        ClimateClass::Af
    }
}
