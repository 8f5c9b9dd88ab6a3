//! NATS subscriptions for incoming form requests

use anyhow::Result;
use async_nats::{Client, Message};
use futures::stream::{self, BoxStream, StreamExt};
use tracing::info;

/// Which subject a request arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Request for the empty form description
    Form,
    /// Form submission to validate and classify
    Predict,
}

/// A request message tagged with its kind
#[derive(Debug)]
pub struct IncomingRequest {
    pub kind: RequestKind,
    pub message: Message,
}

/// Consumer for form and prediction requests
pub struct RequestConsumer {
    client: Client,
    form_subject: String,
    predict_subject: String,
}

impl RequestConsumer {
    /// Create a new request consumer
    pub fn new(client: Client, form_subject: &str, predict_subject: &str) -> Self {
        Self {
            client,
            form_subject: form_subject.to_string(),
            predict_subject: predict_subject.to_string(),
        }
    }

    /// Subscribe to both request subjects and merge them into one stream
    pub async fn subscribe(&self) -> Result<BoxStream<'static, IncomingRequest>> {
        let form = self.client.subscribe(self.form_subject.clone()).await?;
        info!(subject = %self.form_subject, "Subscribed to form subject");

        let predict = self.client.subscribe(self.predict_subject.clone()).await?;
        info!(subject = %self.predict_subject, "Subscribed to predict subject");

        let form = form.map(|message| IncomingRequest {
            kind: RequestKind::Form,
            message,
        });
        let predict = predict.map(|message| IncomingRequest {
            kind: RequestKind::Predict,
            message,
        });

        Ok(stream::select(form, predict).boxed())
    }

    pub fn form_subject(&self) -> &str {
        &self.form_subject
    }

    pub fn predict_subject(&self) -> &str {
        &self.predict_subject
    }
}
