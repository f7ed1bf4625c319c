mod app;
mod catalog;
mod config;
mod dispatch;
mod parse;
mod validation;

pub use app::{AppError, AppResult};
pub use catalog::CatalogError;
pub use config::ConfigError;
pub use dispatch::DispatchError;
pub use parse::ParseError;
pub use validation::ValidationError;
