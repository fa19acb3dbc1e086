use futures::future::{BoxFuture, FutureExt};
use reqwest::header::ACCEPT;
use serde_json::Value;

use super::form::FormPayload;
use crate::errors::TransportError;

/// Carries a form payload to an endpoint and hands back the parsed JSON reply.
pub trait Transport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        payload: &'a FormPayload,
    ) -> BoxFuture<'a, Result<Value, TransportError>>;
}

/// `Transport` over HTTP: URL-encoded POST, JSON reply, non-2xx is a failure.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        payload: &'a FormPayload,
    ) -> BoxFuture<'a, Result<Value, TransportError>> {
        async move {
            let response = self
                .client
                .post(url)
                .header(ACCEPT, "application/json")
                .form(payload)
                .send()
                .await?
                .error_for_status()?;

            let body = response.text().await?;
            serde_json::from_str::<Value>(&body).map_err(|e| TransportError::Malformed(e.to_string()))
        }
        .boxed()
    }
}
