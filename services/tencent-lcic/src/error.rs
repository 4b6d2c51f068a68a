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

use thiserror::Error;

/// Errors returned by [`Client`](crate::Client).
///
/// Every failure is handed back to the caller, nothing is retried here.
#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be signed or built.
    #[error("failed to sign request: {0}")]
    Signing(#[source] tcsign_core::Error),

    /// The payload could not be serialized into JSON.
    #[error("failed to serialize request payload")]
    InvalidPayload(#[source] serde_json::Error),

    /// Network, DNS or timeout failure.
    #[error("failed to send request: {0}")]
    Transport(#[source] tcsign_core::Error),

    /// The server answered with a status other than 200, the body is dropped.
    #[error("unexpected http status: {0}")]
    HttpStatus(u16),

    /// The body is not a JSON object.
    #[error("response body is not a JSON object")]
    InvalidJson(#[source] Option<serde_json::Error>),

    /// The server reported a business error in `Response.Error`.
    #[error("remote error: {message}")]
    Remote {
        /// `Response.Error.Code`, like `AuthFailure.SignatureFailure`.
        code: Option<String>,
        /// `Response.Error.Message`.
        message: String,
    },

    /// The response is 200 OK but lacks the fields the action needs.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The caller gave up before the response arrived.
    #[error("request cancelled")]
    Cancelled,
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
