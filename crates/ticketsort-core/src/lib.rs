pub mod category;
pub mod config;
pub mod envelope;
mod error;
pub mod request;

pub use category::{Category, CategorySet};
pub use config::ModelSettings;
pub use envelope::{Envelope, HttpResponse};
pub use error::{ConfigError, CoreError, RequestError};
pub use request::{ClassificationRequest, HelpAndSupportData, ServiceRequest, parse_event};
