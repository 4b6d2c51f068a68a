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

use crate::action::Payload;
use crate::constants::*;
use crate::{Action, Config, Credential, Envelope, Error, RequestSigner, Result};
use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST};
use http::{Method, StatusCode};
use log::debug;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tcsign_core::{Context, ProvideCredential, Signer};

/// Client signs and dispatches LCIC API calls.
///
/// Calls are independent of each other and may run concurrently. Failures are
/// returned to the caller as is: nothing is retried, and since actions like
/// [`CreateRoom`](crate::CreateRoom) are not idempotent, retrying after a
/// transport error is a decision only the caller can make.
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<Config>,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a new client.
    ///
    /// `ctx` must carry an [`HttpSend`](tcsign_core::HttpSend) implementation,
    /// credentials are loaded from `provider` for every call.
    pub fn new(
        ctx: Context,
        config: Config,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            signer: Signer::new(ctx, provider, RequestSigner::new()),
        }
    }

    /// Config used by this client.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Call `action` in the configured region and decode its result.
    pub async fn call<A: Action>(&self, action: &A) -> Result<A::Output> {
        self.call_in(action, self.config.region.as_deref()).await
    }

    /// Call `action` in `region` and decode its result.
    pub async fn call_in<A: Action>(&self, action: &A, region: Option<&str>) -> Result<A::Output> {
        let cred = self.credential().await?;
        let payload = Payload {
            sdk_app_id: cred.app_id,
            action,
        };

        let envelope = self.dispatch(A::NAME, &payload, region, &cred).await?;
        if let Some(request_id) = envelope.request_id() {
            debug!("{} finished with request id {request_id}", A::NAME);
        }
        action.decode(&envelope, &self.config).into_result()
    }

    /// Call `action`, giving up with [`Error::Cancelled`] once `cancel` completes.
    ///
    /// Cancelling does not undo anything on the server: a `CreateRoom` whose
    /// request already reached LCIC may still create the room.
    pub async fn call_until<A, F>(&self, action: &A, cancel: F) -> Result<A::Output>
    where
        A: Action,
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;

            _ = cancel => {
                debug!("{} cancelled by caller", A::NAME);
                Err(Error::Cancelled)
            }
            res = self.call(action) => res,
        }
    }

    /// Sign and send `payload` as `action`, returning the raw envelope.
    ///
    /// `region` is omitted from the request when `None` or empty.
    pub async fn send<P>(&self, action: &str, payload: &P, region: Option<&str>) -> Result<Envelope>
    where
        P: Serialize + ?Sized + Sync,
    {
        let cred = self.credential().await?;
        self.dispatch(action, payload, region, &cred).await
    }

    async fn credential(&self) -> Result<Credential> {
        self.signer
            .credential()
            .await
            .map_err(Error::Signing)?
            .ok_or_else(|| {
                Error::Signing(tcsign_core::Error::credential_invalid(
                    "no credential provided",
                ))
            })
    }

    async fn dispatch<P>(
        &self,
        action: &str,
        payload: &P,
        region: Option<&str>,
        cred: &Credential,
    ) -> Result<Envelope>
    where
        P: Serialize + ?Sized + Sync,
    {
        // Serialized once: these bytes are both hashed and sent.
        let body = Bytes::from(serde_json::to_vec(payload).map_err(Error::InvalidPayload)?);

        let host = self.config.host().map_err(Error::Signing)?;
        let mut builder = http::Request::builder()
            .method(Method::POST)
            .uri(self.config.endpoint_url())
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(HOST, host)
            .header(X_TC_ACTION, action)
            .header(X_TC_VERSION, self.config.version.as_str());
        if let Some(region) = region.filter(|r| !r.is_empty()) {
            builder = builder.header(X_TC_REGION, region);
        }
        let mut req = builder
            .body(body)
            .map_err(|e| Error::Signing(e.into()))?;

        self.signer
            .sign_with(&mut req, Some(cred))
            .await
            .map_err(Error::Signing)?;

        let timeout = self.config.timeout;
        let resp = match tokio::time::timeout(timeout, self.signer.context().http_send(req)).await {
            Ok(resp) => resp.map_err(Error::Transport)?,
            Err(_) => {
                return Err(Error::Transport(tcsign_core::Error::unexpected(format!(
                    "request {action} timed out after {timeout:?}"
                ))))
            }
        };

        let status = resp.status();
        debug!("{action} responded with http status {status}");
        if status != StatusCode::OK {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        Envelope::from_slice(resp.body())
    }
}
