//! CLI command implementations.

pub mod publish;

pub use publish::{publish_vault, PublishOptions};
