//! Domain layer types and invariants.

pub mod payment_uri;
