pub mod handlers;

pub use handlers::MetricsState;
