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

//! Tencent Cloud LCIC signer and client.
//!
//! Requests are signed with TC3-HMAC-SHA256:
//!
//! 1. the canonical request covers `content-type`, `host`, `x-tc-action` and
//!    the SHA-256 of the exact body that is sent,
//! 2. a signing key is derived from the secret key through
//!    date, service and `tc3_request`,
//! 3. the signature lands in the `Authorization` header together with the
//!    credential scope.
//!
//! [`Client`] ties this together with a [`CredentialStore`], sends the
//! request and decodes the response envelope into typed results.
//!
//! ```no_run
//! use tcsign_core::Context;
//! use tcsign_http_send_reqwest::ReqwestHttpSend;
//! use tcsign_tencent_lcic::{Client, Config, CredentialStore, RegisterUser};
//!
//! # async fn example() -> tcsign_tencent_lcic::Result<()> {
//! let store = CredentialStore::new();
//! store.configure("AKID...", "secret", 1400000001);
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! let client = Client::new(ctx, Config::default(), store.clone());
//!
//! let user = client.call(&RegisterUser::default()).await?;
//! println!("registered {}", user.user_id);
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;
pub use config::RoomNameSource;

mod credential;
pub use credential::Credential;

mod error;
pub use error::Error;
pub use error::Result;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{
    authorization, generate_signing_key, string_to_sign, CanonicalRequest, RequestSigner,
    SigningContext,
};

mod action;
pub use action::{
    Action, CreateRoom, GetRooms, RegisterUser, RoomCreation, RoomSummary, UserRegistration,
};

pub mod response;
pub use response::{Envelope, Outcome};

mod client;
pub use client::Client;
