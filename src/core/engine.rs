use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives the three pipeline phases in order.
pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🔄 Starting climate analysis...");

        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} annual records", raw_data.len());

        let result = self.pipeline.transform(raw_data).await?;
        tracing::info!("Classified {} years", result.years.len());

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
