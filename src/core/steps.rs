use crate::core::combinators::Step;
use crate::core::transforms::{adjust_numeric, filter_by_field};
use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_finite, validate_non_empty_string};
use serde::{Deserialize, Serialize};

pub type RecordStep<'a> = Step<'a, Vec<Record>, EtlError>;

/// A transform as it appears in a job file or on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepConfig {
    Filter { field: String, value: String },
    Adjust { field: String, percentage: f64 },
}

impl StepConfig {
    pub fn name(&self) -> String {
        match self {
            StepConfig::Filter { field, value } => format!("filter({} == {:?})", field, value),
            StepConfig::Adjust { field, percentage } => {
                format!("adjust({} {:+}%)", field, percentage)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            StepConfig::Filter { field, .. } => validate_non_empty_string("steps.filter.field", field),
            StepConfig::Adjust { field, percentage } => {
                validate_non_empty_string("steps.adjust.field", field)?;
                validate_finite("steps.adjust.percentage", *percentage)
            }
        }
    }

    pub fn into_step(self) -> RecordStep<'static> {
        match self {
            StepConfig::Filter { field, value } => {
                Box::new(move |records: Vec<Record>| -> Result<Vec<Record>> {
                    Ok(filter_by_field(&records, &field, &value))
                })
            }
            StepConfig::Adjust { field, percentage } => {
                Box::new(move |records: Vec<Record>| adjust_numeric(&records, &field, percentage))
            }
        }
    }
}
