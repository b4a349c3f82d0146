pub mod error;
pub mod request;

pub use error::{Error, Result};
pub use request::{Method, Request};

/// Re-export commonly used crates
pub use async_trait::async_trait;
pub use serde;
pub use serde_json;
pub use url;
