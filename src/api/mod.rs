pub mod gemini;
pub mod live_client;

pub use gemini::{GeminiProvider, LlmProvider};
pub use live_client::{Fetched, LiveClient, TelemetrySource};
