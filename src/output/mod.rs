pub mod schema;

pub use schema::{FileFailure, PipelineStage, RunReport};
