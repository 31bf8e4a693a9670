pub mod classify;
pub mod engine;
pub mod pipeline;
pub mod summary;

pub use crate::domain::model::{
    AnalysisResult, AnnualClimate, ClassifiedYear, ClimateClass, ClimateSummary,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
