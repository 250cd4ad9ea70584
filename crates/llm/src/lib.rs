pub mod compressor;
pub mod provider;
pub mod providers;

pub use compressor::{shared_compressor, Compressor, LlmCompressor};
pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::create_provider;
