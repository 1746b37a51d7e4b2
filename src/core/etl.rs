use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting CSV processing");

        tracing::info!("Extracting records...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} record(s)", raw_data.len());

        tracing::info!("Transforming records...");
        let transformed = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Kept {} of {} record(s)",
            transformed.processed_records.len(),
            transformed.input_count
        );

        tracing::info!("Loading results...");
        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
