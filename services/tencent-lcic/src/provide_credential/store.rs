// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::Credential;
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};
use tcsign_core::{Context, ProvideCredential, Result};

/// CredentialStore holds the credential that every request is signed with.
///
/// `configure` swaps in a whole new snapshot, `current` hands out the latest
/// one. Readers never observe a half-updated credential and the lock is never
/// held across an await point. Cloning the store shares the same slot.
///
/// Nothing is validated here: empty or wrong values are accepted and will be
/// rejected by the server instead.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    slot: Arc<RwLock<Arc<Credential>>>,
}

impl CredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `credential`.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Arc::new(credential))),
        }
    }

    /// Replace the current credential, last write wins.
    pub fn configure(&self, secret_id: impl Into<String>, secret_key: impl Into<String>, app_id: u64) {
        let cred = Arc::new(Credential::new(secret_id, secret_key, app_id));
        // A panicking writer can only leave a complete snapshot behind.
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = cred;
    }

    /// Latest credential snapshot.
    pub fn current(&self) -> Arc<Credential> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ProvideCredential for CredentialStore {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(Credential::clone(&self.current())))
    }
}
