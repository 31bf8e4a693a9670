pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::era5::{Era5Client, Era5Settings};
pub use config::{service::ServiceConfig, storage::LocalStorage, CliConfig};
pub use core::{classify::classify, engine::AnalysisEngine, pipeline::ClimatePipeline};
pub use domain::model::{AnnualClimate, ClimateClass, ClimateSummary, Region};
pub use utils::error::{ClimateError, Result};
