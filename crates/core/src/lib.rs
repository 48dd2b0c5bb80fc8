//! Core types, traits, and error definitions for Service Hub.
//!
//! This crate provides the building blocks shared by the dispatcher, the
//! service adapters, and the concrete backend clients: the request/result
//! model, the error taxonomy, configuration, and the client traits that the
//! remote services are reached through.

pub mod clients;
pub mod config;
pub mod error;
pub mod mocks;
pub mod traits;
pub mod types;

pub use clients::ServiceClients;
pub use error::{Error, ErrorKind, Result};
pub use traits::*;
pub use types::*;
