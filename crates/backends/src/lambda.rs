//! Lambda implementation of FunctionInvoker.

use async_trait::async_trait;
use aws_sdk_lambda::{error::DisplayErrorContext, primitives::Blob, types::InvocationType, Client};
use bytes::Bytes;

use service_hub_core::{traits::FunctionInvoker, Error, Result};

/// Synchronous (request/response) Lambda invocation.
#[derive(Debug, Clone)]
pub struct LambdaFunctionInvoker {
    client: Client,
}

impl LambdaFunctionInvoker {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    pub fn new_with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Response payload, or the function's own error.
///
/// A function that raised still answers with a payload describing the
/// error, flagged through the function error marker.
pub(crate) fn function_payload(
    function_name: &str,
    function_error: Option<&str>,
    payload: Option<Vec<u8>>,
) -> Result<Bytes> {
    let payload = payload.unwrap_or_default();

    if let Some(marker) = function_error {
        return Err(Error::invocation(format!(
            "function `{}` failed ({}): {}",
            function_name,
            marker,
            String::from_utf8_lossy(&payload)
        )));
    }

    Ok(Bytes::from(payload))
}

#[async_trait]
impl FunctionInvoker for LambdaFunctionInvoker {
    async fn invoke_function(&self, function_name: &str, payload: Bytes) -> Result<Bytes> {
        let output = self
            .client
            .invoke()
            .function_name(function_name)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(payload.to_vec()))
            .send()
            .await
            .map_err(|e| Error::invocation(format!("Lambda invoke error: {}", DisplayErrorContext(&e))))?;

        tracing::debug!(
            function = function_name,
            status = output.status_code(),
            "Lambda invoked"
        );

        let function_error = output.function_error().map(str::to_string);
        function_payload(
            function_name,
            function_error.as_deref(),
            output.payload.map(Blob::into_inner),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_passed_through() {
        let bytes = function_payload("summarize_lambda", None, Some(b"{\"body\":\"{}\"}".to_vec())).unwrap();
        assert_eq!(bytes, Bytes::from_static(b"{\"body\":\"{}\"}"));
    }

    #[test]
    fn test_function_error_is_invocation_error() {
        let err = function_payload(
            "summarize_lambda",
            Some("Unhandled"),
            Some(b"{\"errorMessage\":\"boom\"}".to_vec()),
        )
        .unwrap_err();

        assert_eq!(err.kind(), service_hub_core::ErrorKind::Invocation);
        assert!(err.to_string().contains("boom"));
        assert!(err.to_string().contains("summarize_lambda"));
    }

    #[test]
    fn test_missing_payload_is_empty() {
        let bytes = function_payload("f", None, None).unwrap();
        assert!(bytes.is_empty());
    }
}
