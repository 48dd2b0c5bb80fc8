//! Remote service clients for Service Hub.
//!
//! Concrete implementations of the core client traits:
//! - `bedrock`: model invocation
//! - `lambda`: function invocation
//! - `http`: the translation HTTP gateway
//! - `lex`: the conversational agent
//! - `connect`: session setup and validation

pub mod bedrock;
pub mod connect;
pub mod http;
pub mod lambda;
pub mod lex;

pub use bedrock::BedrockModelInvoker;
pub use connect::{connect, load_sdk_config, validate_endpoint, RemoteClients};
pub use http::ReqwestHttpGateway;
pub use lambda::LambdaFunctionInvoker;
pub use lex::LexConversationAgent;
