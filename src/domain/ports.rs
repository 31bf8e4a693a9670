use crate::domain::model::{AnalysisResult, AnnualClimate, Region};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn auth_token(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn region(&self) -> Region;
    fn start_year(&self) -> i32;
    fn end_year(&self) -> i32;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<AnnualClimate>>;
    async fn transform(&self, data: Vec<AnnualClimate>) -> Result<AnalysisResult>;
    async fn load(&self, result: AnalysisResult) -> Result<String>;
}
