use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use super::store::{KeyValueStore, StoreError};

pub const DEFAULT_STORAGE_KEY: &str = "book_mailing_list";

#[derive(Error, Debug)]
pub enum SignupError {
    #[error("Enter a real email")]
    InvalidEmail,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Stored mailing list is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: String,
    pub at: DateTime<Utc>,
}

/// Signups kept under one storage key. New signups are prepended, so the
/// stored list reads newest first
#[derive(Clone)]
pub struct MailingList {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl MailingList {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn subscribe(&self, email: &str, at: DateTime<Utc>) -> Result<Subscriber, SignupError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(SignupError::InvalidEmail);
        }

        let mut list = self.subscribers()?;
        let subscriber = Subscriber {
            email: email.to_string(),
            at,
        };
        list.insert(0, subscriber.clone());

        let content = serde_json::to_string(&list)?;
        self.store.set(&self.key, &content)?;

        tracing::info!(total = list.len(), "mailing list signup saved");
        Ok(subscriber)
    }

    pub fn subscribers(&self) -> Result<Vec<Subscriber>, SignupError> {
        match self.store.get(&self.key)? {
            Some(content) if !content.trim().is_empty() => Ok(serde_json::from_str(&content)?),
            _ => Ok(Vec::new()),
        }
    }
}
