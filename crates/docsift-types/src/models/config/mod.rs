//! Application configuration models.

mod app;
mod pipeline;
mod progress;
mod server;
mod upstream;

pub use app::DocsiftConfig;
pub use pipeline::{PipelineConfig, RetryConfig};
pub use progress::ProgressConfig;
pub use server::ServerConfig;
pub use upstream::{UpstreamAuthMode, UpstreamConfig};
