use std::future::Future;

use cos_common::Secret;
use log::*;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config::PushConfig, helpers::calculate_hmac, push::PushMessage};

pub const ACCESS_KEY_HEADER: &str = "X-Push-Access-Key";
pub const SIGNATURE_HEADER: &str = "X-Push-Signature";
/// Pushes are addressed to application accounts, i.e. user ids
const PUSH_TARGET: &str = "ACCOUNT";

#[derive(Debug, Clone, Error)]
pub enum PushError {
    #[error("The push queue has been closed")]
    QueueClosed,
    #[error("Could not initialize the push gateway client. {0}")]
    Initialization(String),
    #[error("Could not reach the push gateway. {0}")]
    Transport(String),
    #[error("The push gateway rejected the message. Status {status}. {message}")]
    Rejected { status: u16, message: String },
    #[error("Could not serialize the push request. {0}")]
    Serialization(String),
}

/// A transport that delivers a single notification to its target.
pub trait PushGateway {
    fn push(&self, message: &PushMessage) -> impl Future<Output = Result<(), PushError>> + Send;
}

//----------------------------------------------   LogOnlyGateway  ----------------------------------------------------
/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlyGateway;

impl PushGateway for LogOnlyGateway {
    async fn push(&self, message: &PushMessage) -> Result<(), PushError> {
        info!("📣️ (not delivered) {message}");
        Ok(())
    }
}

//----------------------------------------------   HttpPushGateway  ---------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    pub app_key: i64,
    pub target: String,
    pub target_value: String,
    pub push_type: String,
    pub title: String,
    pub body: String,
}

/// Delivers notifications to an HTTP push service. Every request body is signed with HMAC-SHA256.
#[derive(Clone)]
pub struct HttpPushGateway {
    client: Client,
    url: String,
    app_key: i64,
    access_key: String,
    secret: Secret<String>,
    push_type: String,
    title: String,
}

impl HttpPushGateway {
    pub fn new(config: &PushConfig) -> Result<Self, PushError> {
        let url = config
            .url
            .clone()
            .ok_or_else(|| PushError::Initialization("No push gateway URL has been configured".into()))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PushError::Initialization(e.to_string()))?;
        info!("📣️ Push gateway at {url}. Requests time out after {:?}", config.timeout);
        Ok(Self {
            client,
            url,
            app_key: config.app_key,
            access_key: config.access_key.clone(),
            secret: config.secret.clone(),
            push_type: config.push_type.clone(),
            title: config.title.clone(),
        })
    }

    pub fn build_request(&self, message: &PushMessage) -> PushRequest {
        PushRequest {
            app_key: self.app_key,
            target: PUSH_TARGET.to_string(),
            target_value: message.target_user_id.clone(),
            push_type: self.push_type.clone(),
            title: self.title.clone(),
            body: message.text.clone(),
        }
    }
}

impl PushGateway for HttpPushGateway {
    async fn push(&self, message: &PushMessage) -> Result<(), PushError> {
        let body = serde_json::to_vec(&self.build_request(message)).map_err(|e| PushError::Serialization(e.to_string()))?;
        let signature = calculate_hmac(self.secret.reveal(), &body);
        trace!("📣️ Sending push to {}", message.target_user_id);
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCESS_KEY_HEADER, &self.access_key)
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            trace!("📣️ Push gateway replied {status}");
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(PushError::Rejected { status: status.as_u16(), message })
        }
    }
}
