use crate::core::combinators::StepPipeline;
use crate::core::output::render;
use crate::core::parser::parse_csv_with;
use crate::core::{ConfigProvider, Pipeline, Record, Storage, TransformResult};
use crate::utils::error::{EtlError, Result};
use std::path::Path;

/// Reads a CSV file, runs the configured steps over its records and writes
/// one output file per configured format.
pub struct CsvPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CsvPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CsvPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let input = self.config.input_path();
        tracing::debug!("Reading input from: {}", input);

        let bytes = self.storage.read_file(input).await?;
        let text = String::from_utf8(bytes).map_err(|e| EtlError::ValidationError {
            message: format!("input '{}' is not valid UTF-8: {}", input, e),
        })?;

        parse_csv_with(&text, &self.config.parse_options())
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let input_count = data.len();

        let mut steps = StepPipeline::new();
        for step in self.config.steps() {
            steps.push(step.name(), step.into_step());
        }
        tracing::debug!(
            "Applying {} step(s): {}",
            steps.len(),
            steps.names().collect::<Vec<_>>().join(" -> ")
        );

        let processed_records = steps.run(Ok(data))?;

        Ok(TransformResult {
            input_count,
            processed_records,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let formats = self.config.output_formats()?;
        let mut written = Vec::with_capacity(formats.len());

        for format in formats {
            let content = render(&result.processed_records, format)?;
            let path = Path::new(self.config.output_path())
                .join(format!("output.{}", format.extension()))
                .to_string_lossy()
                .into_owned();

            tracing::debug!("Writing {} bytes to {}", content.len(), path);
            self.storage.write_file(&path, content.as_bytes()).await?;
            written.push(path);
        }

        Ok(written.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::output::OutputFormat;
    use crate::core::parser::ParseOptions;
    use crate::core::steps::StepConfig;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, content: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), content.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().await;
            files
                .get(path)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
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
        parse_options: ParseOptions,
        steps: Vec<StepConfig>,
        formats: Vec<String>,
    }

    impl MockConfig {
        fn new(steps: Vec<StepConfig>) -> Self {
            Self {
                parse_options: ParseOptions::default(),
                steps,
                formats: vec!["csv".to_string()],
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            "employees.csv"
        }

        fn output_path(&self) -> &str {
            "out"
        }

        fn output_formats(&self) -> Result<Vec<OutputFormat>> {
            crate::utils::validation::validate_output_formats("format", &self.formats)
        }

        fn parse_options(&self) -> ParseOptions {
            self.parse_options
        }

        fn steps(&self) -> Vec<StepConfig> {
            self.steps.clone()
        }
    }

    const EMPLOYEES: &str = "name,age,salary,department
Alice,25,50000,Engineering
Bob,30,60000,Engineering
Charlie,35,75000,Marketing";

    fn raise_engineering() -> Vec<StepConfig> {
        vec![
            StepConfig::Filter {
                field: "department".to_string(),
                value: "Engineering".to_string(),
            },
            StepConfig::Adjust {
                field: "salary".to_string(),
                percentage: 10.0,
            },
        ]
    }

    #[tokio::test]
    async fn test_extract_parses_input() {
        let storage = MockStorage::with_file("employees.csv", EMPLOYEES);
        let pipeline = CsvPipeline::new(storage, MockConfig::new(vec![]));

        let records = pipeline.extract().await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].get("name"), Some("Charlie"));
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let storage = MockStorage::with_file("other.csv", EMPLOYEES);
        let pipeline = CsvPipeline::new(storage, MockConfig::new(vec![]));

        assert!(matches!(pipeline.extract().await, Err(EtlError::IoError(_))));
    }

    #[tokio::test]
    async fn test_extract_header_only_respects_options() {
        let storage = MockStorage::with_file("employees.csv", "name,salary\n");
        let pipeline = CsvPipeline::new(storage.clone(), MockConfig::new(vec![]));
        assert!(matches!(
            pipeline.extract().await,
            Err(EtlError::EmptyInput { lines: 1 })
        ));

        let mut config = MockConfig::new(vec![]);
        config.parse_options.allow_header_only = true;
        let pipeline = CsvPipeline::new(storage, config);
        assert!(pipeline.extract().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transform_runs_steps_in_order() {
        let storage = MockStorage::with_file("employees.csv", EMPLOYEES);
        let pipeline = CsvPipeline::new(storage, MockConfig::new(raise_engineering()));

        let records = pipeline.extract().await.unwrap();
        let result = pipeline.transform(records).await.unwrap();

        assert_eq!(result.input_count, 3);
        assert_eq!(result.processed_records.len(), 2);
        assert_eq!(result.processed_records[0].get("salary"), Some("55000.00"));
        assert_eq!(result.processed_records[1].get("salary"), Some("66000.00"));
    }

    #[tokio::test]
    async fn test_transform_without_steps_passes_records_through() {
        let storage = MockStorage::with_file("employees.csv", EMPLOYEES);
        let pipeline = CsvPipeline::new(storage, MockConfig::new(vec![]));

        let records = pipeline.extract().await.unwrap();
        let result = pipeline.transform(records.clone()).await.unwrap();

        assert_eq!(result.processed_records, records);
    }

    #[tokio::test]
    async fn test_transform_propagates_invalid_number() {
        let storage = MockStorage::with_file("employees.csv", "name,salary\nAlice,n/a");
        let pipeline = CsvPipeline::new(storage, MockConfig::new(raise_engineering()[1..].to_vec()));

        let records = pipeline.extract().await.unwrap();
        assert!(matches!(
            pipeline.transform(records).await,
            Err(EtlError::InvalidNumber { index: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_load_writes_each_format() {
        let storage = MockStorage::with_file("employees.csv", EMPLOYEES);
        let mut config = MockConfig::new(vec![]);
        config.formats = vec!["csv".to_string(), "json".to_string()];
        let pipeline = CsvPipeline::new(storage.clone(), config);

        let result = TransformResult {
            input_count: 1,
            processed_records: vec![Record::from_pairs([("name", "Alice"), ("salary", "1.00")])],
        };
        let written = pipeline.load(result).await.unwrap();

        let csv_path = Path::new("out").join("output.csv").to_string_lossy().into_owned();
        let json_path = Path::new("out").join("output.json").to_string_lossy().into_owned();
        assert_eq!(written, format!("{}, {}", csv_path, json_path));
        assert_eq!(
            storage.get_file(&csv_path).await.unwrap(),
            "name,salary\nAlice,1.00\n"
        );
        assert!(storage.get_file(&json_path).await.unwrap().contains("\"Alice\""));
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_format() {
        let storage = MockStorage::with_file("employees.csv", EMPLOYEES);
        let mut config = MockConfig::new(vec![]);
        config.formats = vec!["xlsx".to_string()];
        let pipeline = CsvPipeline::new(storage, config);

        let result = TransformResult {
            input_count: 0,
            processed_records: vec![],
        };
        assert!(matches!(
            pipeline.load(result).await,
            Err(EtlError::InvalidConfigValueError { .. })
        ));
    }
}
