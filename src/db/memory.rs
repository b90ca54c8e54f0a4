// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process credential storage for local development and tests.

use crate::models::Credential;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds the credential in memory. Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Arc<RwLock<Option<Credential>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<Credential> {
        self.slot.read().await.clone()
    }

    pub async fn put(&self, credential: &Credential) {
        *self.slot.write().await = Some(credential.clone());
    }
}
