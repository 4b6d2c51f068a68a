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

use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use bytes::Bytes;
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// Every call loads a fresh credential snapshot from the provider, nothing
/// derived from the credential is kept between requests.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
        }
    }

    /// Context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Load a credential snapshot from the provider.
    pub async fn credential(&self) -> Result<Option<K>> {
        let cred = self.loader.provide_credential(&self.ctx).await?;
        if !cred.is_valid() {
            log::warn!("credential is missing or incomplete, the request will likely be rejected");
        }
        Ok(cred)
    }

    /// Sign the request with a freshly loaded credential.
    pub async fn sign(&self, req: &mut http::Request<Bytes>) -> Result<()> {
        let cred = self.credential().await?;
        self.sign_with(req, cred.as_ref()).await
    }

    /// Sign the request with a credential snapshot the caller already holds.
    ///
    /// Use this when the same snapshot also feeds the request payload.
    pub async fn sign_with(&self, req: &mut http::Request<Bytes>, cred: Option<&K>) -> Result<()> {
        self.builder.sign_request(&self.ctx, req, cred).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Clone, Debug)]
    struct Key(String);

    impl SigningCredential for Key {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    #[derive(Debug)]
    struct SharedLoader(Arc<Mutex<String>>);

    #[async_trait]
    impl ProvideCredential for SharedLoader {
        type Credential = Key;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Key>> {
            Ok(Some(Key(self.0.lock().expect("lock poisoned").clone())))
        }
    }

    #[derive(Debug)]
    struct HeaderSigner;

    #[async_trait]
    impl SignRequest for HeaderSigner {
        type Credential = Key;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut http::Request<Bytes>,
            cred: Option<&Key>,
        ) -> Result<()> {
            let key = cred.map(|k| k.0.as_str()).unwrap_or("anonymous");
            req.headers_mut().insert("x-key", key.parse()?);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_signer_reloads_credential_every_time() -> Result<()> {
        let shared = Arc::new(Mutex::new("first".to_string()));
        let signer = Signer::new(Context::new(), SharedLoader(shared.clone()), HeaderSigner);

        let mut req = http::Request::new(Bytes::new());
        signer.sign(&mut req).await?;
        assert_eq!(req.headers()["x-key"], "first");

        *shared.lock().expect("lock poisoned") = "second".to_string();
        signer.sign(&mut req).await?;
        assert_eq!(req.headers()["x-key"], "second");
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_with_snapshot() -> Result<()> {
        let shared = Arc::new(Mutex::new("loaded".to_string()));
        let signer = Signer::new(Context::new(), SharedLoader(shared), HeaderSigner);

        let mut req = http::Request::new(Bytes::new());
        signer
            .sign_with(&mut req, Some(&Key("held".to_string())))
            .await?;
        assert_eq!(req.headers()["x-key"], "held");
        Ok(())
    }
}
