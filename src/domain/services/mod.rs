pub mod image_pipeline;
pub mod image_source;
