pub mod aggregate;
pub mod cumulative;
pub mod dashboard;
pub mod descriptor;
pub mod error;
pub mod pipeline;
pub mod range;
pub mod sleep_stages;
pub mod trend;

pub use descriptor::{Collection, MetricKind};
pub use error::MetricsError;
pub use range::{resolve_day, resolve_range, DateRange};
