//! Knative client plugin that lists Kamelet sources and binds them to Knative sinks
//! through KameletBindings.
pub mod binding;
pub mod cli;
pub mod client;
pub mod error;
pub mod list;
pub mod name;
pub mod output;
pub mod properties;
pub mod sink;
pub mod validate;
pub mod version;

pub use error::{Error, Result};
