//! Analyzer service implementations

pub mod credentials;
pub mod narrative;
pub mod progress;
pub mod provider_client;
pub mod record_store;

#[cfg(test)]
pub mod tests;

pub use credentials::ProviderCredentials;
pub use narrative::{synthesize, Narrative};
pub use progress::ChannelProgressSink;
pub use provider_client::{HttpProviderClient, ProviderEndpoints};
pub use record_store::MemoryRecordStore;
