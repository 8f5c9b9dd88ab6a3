//! NATS replies to form requests

use anyhow::Result;
use async_nats::{Client, Subject};
use serde::Serialize;
use tracing::debug;

/// Publishes JSON replies to a request's reply subject
#[derive(Clone)]
pub struct ReplyProducer {
    client: Client,
}

impl ReplyProducer {
    /// Create a new reply producer
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Serialize `body` and publish it to `reply_to`
    pub async fn reply<T: Serialize>(&self, reply_to: Subject, body: &T) -> Result<()> {
        let payload = serde_json::to_vec(body)?;
        let bytes = payload.len();

        self.client.publish(reply_to.clone(), payload.into()).await?;

        debug!(subject = %reply_to, bytes = bytes, "Published reply");
        Ok(())
    }
}
