//! Tests for analyzer services
//!
//! Provider client tests run against wiremock servers standing in for
//! each provider's API; store and narrative tests use in-process doubles.

pub mod record_store;
