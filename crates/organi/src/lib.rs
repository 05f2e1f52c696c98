pub mod config;
pub mod error;
pub mod evaluation;
pub mod organization;
pub mod telemetry;

pub use error::AppError;
