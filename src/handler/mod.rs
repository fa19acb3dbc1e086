//! Client side of the publish flow: a form bound to an endpoint, with a success
//! banner and an error banner reporting how the last submission went.

use log::{debug, info, warn};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{PublishError, TransportError};

pub mod banner;
pub mod form;
pub mod transport;

pub use banner::{Banner, BannerState, Banners};
pub use form::{Form, FormPayload};
pub use transport::{HttpTransport, Transport};

/// Shown in the error banner whenever the exchange itself fails.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "An error occurred while publishing the post. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseResult {
    Success { message: String },
    Failure { message: String },
}

impl From<Result<String, PublishError>> for ResponseResult {
    fn from(outcome: Result<String, PublishError>) -> Self {
        match outcome {
            Ok(message) => ResponseResult::Success { message },
            Err(PublishError::ServerReported(message)) => ResponseResult::Failure { message },
            Err(PublishError::Transport(_)) => ResponseResult::Failure {
                message: TRANSPORT_FAILURE_MESSAGE.to_string(),
            },
        }
    }
}

/// A submit event coming from the bound form.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Completed(ResponseResult),
    /// Another submission was still in flight; nothing was sent.
    Ignored,
}

// Script-style truthiness: null, false, 0, NaN and "" are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Script-style string conversion of a reply field written into a banner
fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (_, Some(u)) => u.to_string(),
            _ => n.as_f64().map(|f| f.to_string()).unwrap_or_default(),
        },
        Value::Array(items) => items.iter().map(display_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Reads a publish reply. A truthy `error` wins over `success`; a reply with
/// neither is a success with an empty message. Only non-object replies are
/// malformed.
pub fn interpret_reply(reply: Value) -> Result<String, PublishError> {
    let Value::Object(fields) = reply else {
        return Err(TransportError::Malformed("expected a JSON object".to_string()).into());
    };

    match fields.get("error") {
        Some(error) if is_truthy(error) => Err(PublishError::ServerReported(display_text(error))),
        _ => Ok(fields.get("success").map(display_text).unwrap_or_default()),
    }
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Binds a form to a publish endpoint and reports each submission on the
/// banners.
///
/// The submit control counts as disabled while a request is in flight: a submit
/// arriving in that window still has its default action suppressed but sends
/// nothing and leaves the banners alone.
pub struct FormSubmitHandler<T> {
    form: Arc<Form>,
    banners: Arc<Banners>,
    endpoint: String,
    transport: T,
    submitting: AtomicBool,
}

impl<T: Transport> FormSubmitHandler<T> {
    pub fn new(
        form: Arc<Form>,
        banners: Arc<Banners>,
        endpoint: impl Into<String>,
        transport: T,
    ) -> Self {
        Self {
            form,
            banners,
            endpoint: endpoint.into(),
            transport,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub async fn on_submit(&self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();

        let Some(_in_flight) = InFlight::acquire(&self.submitting) else {
            debug!(
                "Submit on form '{}' ignored: a request is still in flight",
                self.form.id()
            );
            return SubmitOutcome::Ignored;
        };

        let payload = self.form.serialize().await;
        debug!(
            "Submitting form '{}' ({} fields) to {}",
            self.form.id(),
            payload.len(),
            self.endpoint
        );
        let result = ResponseResult::from(self.publish(&payload).await);

        self.banners.apply(&result).await;
        SubmitOutcome::Completed(result)
    }

    /// One exchange with the endpoint, without touching the banners.
    pub async fn publish(&self, payload: &FormPayload) -> Result<String, PublishError> {
        let outcome = match self.transport.post_form(&self.endpoint, payload).await {
            Ok(reply) => interpret_reply(reply),
            Err(e) => Err(e.into()),
        };

        match &outcome {
            Ok(_) => debug!("Publish to {} succeeded", self.endpoint),
            Err(PublishError::ServerReported(message)) => {
                info!("Publish to {} rejected: {}", self.endpoint, message)
            }
            Err(PublishError::Transport(e)) => warn!("Publish to {} failed: {}", self.endpoint, e),
        }
        outcome
    }
}
