use crate::core::output::OutputFormat;
use crate::core::parser::ParseOptions;
use crate::core::steps::StepConfig;
use crate::core::transforms::{DEPARTMENT_FIELD, SALARY_FIELD};
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "csv-chain")]
#[command(about = "Filter and adjust rows of a CSV file")]
pub struct CliConfig {
    #[arg(long, help = "CSV file to read (first line is the header)")]
    pub input: Option<String>,

    #[arg(long, help = "TOML job file; replaces the other pipeline options")]
    pub config: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv")]
    pub format: Vec<String>,

    #[arg(long, help = "Keep only rows whose department equals this value")]
    pub department: Option<String>,

    #[arg(long, requires = "filter_value")]
    pub filter_field: Option<String>,

    #[arg(long, requires = "filter_field")]
    pub filter_value: Option<String>,

    #[arg(long, default_value = SALARY_FIELD)]
    pub adjust_field: String,

    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Percentage to add to the adjust field (negative to decrease)"
    )]
    pub increase: Option<f64>,

    #[arg(long, help = "Accept a header row without data rows")]
    pub allow_header_only: bool,

    #[arg(long, help = "Fail on rows whose column count differs from the header")]
    pub strict_columns: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        self.input.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> Result<Vec<OutputFormat>> {
        validation::validate_output_formats("format", &self.format)
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            allow_header_only: self.allow_header_only,
            strict_columns: self.strict_columns,
        }
    }

    fn steps(&self) -> Vec<StepConfig> {
        let mut steps = Vec::new();

        if let Some(department) = &self.department {
            steps.push(StepConfig::Filter {
                field: DEPARTMENT_FIELD.to_string(),
                value: department.clone(),
            });
        }

        if let (Some(field), Some(value)) = (&self.filter_field, &self.filter_value) {
            steps.push(StepConfig::Filter {
                field: field.clone(),
                value: value.clone(),
            });
        }

        if let Some(percentage) = self.increase {
            steps.push(StepConfig::Adjust {
                field: self.adjust_field.clone(),
                percentage,
            });
        }

        steps
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let input = self.input.as_deref().ok_or_else(|| EtlError::ConfigError {
            message: "--input is required unless --config is given".to_string(),
        })?;
        validation::validate_path("input", input)?;
        validation::validate_path("output_path", &self.output_path)?;
        self.output_formats()?;

        for step in self.steps() {
            step.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("csv-chain").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--input", "employees.csv"]);

        assert_eq!(config.input_path(), "employees.csv");
        assert_eq!(config.output_path(), "./output");
        assert_eq!(config.output_formats().unwrap(), vec![OutputFormat::Csv]);
        assert_eq!(config.parse_options(), ParseOptions::default());
        assert!(config.steps().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_steps_from_flags() {
        let config = parse(&[
            "--input",
            "employees.csv",
            "--department",
            "Engineering",
            "--increase",
            "-5.5",
            "--format",
            "csv,json",
        ]);

        assert_eq!(
            config.steps(),
            vec![
                StepConfig::Filter {
                    field: "department".to_string(),
                    value: "Engineering".to_string()
                },
                StepConfig::Adjust {
                    field: "salary".to_string(),
                    percentage: -5.5
                },
            ]
        );
        assert_eq!(
            config.output_formats().unwrap(),
            vec![OutputFormat::Csv, OutputFormat::Json]
        );
    }

    #[test]
    fn test_generic_filter_requires_both_flags() {
        let result = CliConfig::try_parse_from(["csv-chain", "--input", "a.csv", "--filter-field", "team"]);
        assert!(result.is_err());

        let config = parse(&["--input", "a.csv", "--filter-field", "team", "--filter-value", "b"]);
        assert_eq!(config.steps().len(), 1);
    }

    #[test]
    fn test_validate_requires_input() {
        let config = parse(&[]);
        assert!(matches!(config.validate(), Err(EtlError::ConfigError { .. })));
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let config = parse(&["--input", "a.csv", "--format", "xml"]);
        assert!(config.validate().is_err());
    }
}
