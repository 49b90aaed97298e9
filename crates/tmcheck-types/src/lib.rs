pub mod config;
pub mod error;
pub mod expected;
pub mod log;
pub mod record;

pub use config::{TelemetryConfig, TmEntry};
pub use error::{Error, Result};
pub use expected::{Bounds, RangeSpec};
pub use log::{LogDocument, TmBlock};
pub use record::{Mode, Observation, ParameterValue, Status, ValidationRecord};
