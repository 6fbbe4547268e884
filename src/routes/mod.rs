//! Router Module Index
//!
//! HTTP routes of the navigation service. Every endpoint is public: the session
//! is an input to the navigation decision, not a gate in front of it.

/// Health check and the navigation endpoints.
pub mod public;
