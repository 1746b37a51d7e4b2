pub mod combinators;
pub mod etl;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod steps;
pub mod transforms;

pub use crate::domain::model::{Record, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
