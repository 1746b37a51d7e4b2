//! Parse a comma-separated text blob into records, filter them by a field
//! value and scale a numeric field, composing the steps with short-circuiting
//! combinators.
//!
//! ```
//! use csv_chain::{chain, filter_by_department, increase_salary, parse_csv};
//!
//! let text = "name,salary,department\nAlice,100,Engineering\nBob,90,Marketing";
//! let raised = chain(parse_csv(text), |records| {
//!     increase_salary(&filter_by_department(&records, "Engineering"), 10.0)
//! })
//! .unwrap();
//!
//! assert_eq!(raised.len(), 1);
//! assert_eq!(raised[0].get("salary"), Some("110.00"));
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{JobConfig, LocalStorage};

pub use core::combinators::{chain, pipeline, Step, StepPipeline};
pub use core::parser::{parse_csv, parse_csv_with, ParseOptions};
pub use core::transforms::{adjust_numeric, filter_by_department, filter_by_field, increase_salary};
pub use core::{etl::EtlEngine, pipeline::CsvPipeline};
pub use domain::model::Record;
pub use utils::error::{EtlError, Result};
