pub mod cancel;
pub mod config;
pub mod error;
pub mod study;

pub use cancel::CancelSignal;
pub use config::Config;
pub use error::*;
pub use study::*;
