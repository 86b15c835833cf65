pub mod app_module;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod dataset_io;
pub mod error;
pub mod job;
pub mod logging;
pub mod pipeline;
pub mod storage;
pub mod timing;

pub use error::JobError;

pub type Result<T> = std::result::Result<T, crate::error::JobError>;
