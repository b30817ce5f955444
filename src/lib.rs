pub mod beam;
pub mod cfg;
pub mod cleanup;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod submit;
pub mod templates;
