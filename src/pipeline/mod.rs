// Batch pipelines.

pub mod prepare;
