mod gracefullshutdown;
mod logs;
mod metrics;
mod parse_datetime;
mod tracing;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::metrics::{Labels, Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::parse_datetime::{format_datetime, parse_datetime};
pub use self::tracing::{ServiceTracer, TracingContext};
