//! Core type definitions for Service Hub.
//!
//! Requests flow in as `UserRequest`, are turned into an `AdapterRequest` by
//! the dispatcher, and come back out as a `ServiceResult`.

pub mod adapter;
pub mod encoding;
pub mod intent;
pub mod media;
pub mod request;
pub mod result;

pub use adapter::*;
pub use intent::*;
pub use media::*;
pub use request::*;
pub use result::*;
