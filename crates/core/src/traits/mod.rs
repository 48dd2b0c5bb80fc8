//! Client traits for Service Hub.
//!
//! Traits are organized by what sits on the other side:
//! - `backend`: remote services (model, function, HTTP gateway, agent)
//! - `collaborators`: local collaborators (audio capture, document extraction)

pub mod backend;
pub mod collaborators;

pub use backend::*;
pub use collaborators::*;
