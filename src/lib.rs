pub mod api;
pub mod config;
pub mod event_log;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod sinks;
pub mod store;

pub use config::Config;
pub use event_log::EventLog;
pub use pipeline::Pipeline;
