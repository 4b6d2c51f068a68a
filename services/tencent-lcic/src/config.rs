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

use crate::constants::*;
use crate::Credential;
use std::fmt::{Debug, Formatter};
use std::time::Duration;
use tcsign_core::utils::Redact;
use tcsign_core::{Context, Error, Result};

/// Where the name of a freshly created room comes from.
///
/// `CreateRoom` responses from LCIC carry only `RoomId`. Deployments that put a
/// proxy in front of the API may echo `Name` back as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoomNameSource {
    /// Use the name sent in the request.
    #[default]
    Request,
    /// Use `Response.Name`, falling back to the requested name when absent.
    Response,
}

/// Config for Tencent Cloud LCIC.
#[derive(Clone)]
pub struct Config {
    /// Region sent as `X-TC-Region`, omitted when empty.
    pub region: Option<String>,
    /// Secret ID (Access Key ID)
    pub secret_id: Option<String>,
    /// Secret Key (Secret Access Key)
    pub secret_key: Option<String>,
    /// Numeric application id, `SdkAppId`.
    pub app_id: Option<u64>,
    /// API host, also used as the `Host` header.
    pub endpoint: String,
    /// API version sent as `X-TC-Version`.
    pub version: String,
    /// Upper bound for one request round trip.
    pub timeout: Duration,
    /// How `CreateRoom` results get their room name.
    pub room_name_source: RoomNameSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: None,
            secret_id: None,
            secret_key: None,
            app_id: None,
            endpoint: DEFAULT_HOST.to_string(),
            version: API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            room_name_source: RoomNameSource::default(),
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("secret_id", &Redact::from(&self.secret_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("app_id", &self.app_id)
            .field("endpoint", &self.endpoint)
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .field("room_name_source", &self.room_name_source)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    ///
    /// Values that are not set keep their defaults. An `LCIC_SDK_APP_ID` that
    /// is not a number is rejected.
    pub fn from_env(ctx: &Context) -> Result<Self> {
        let mut cfg = Self {
            region: ctx.env_var(TENCENTCLOUD_REGION),
            secret_id: ctx.env_var(TENCENTCLOUD_SECRET_ID),
            secret_key: ctx.env_var(TENCENTCLOUD_SECRET_KEY),
            app_id: ctx
                .env_var(LCIC_SDK_APP_ID)
                .map(|v| parse_app_id(&v))
                .transpose()?,
            ..Default::default()
        };
        if let Some(endpoint) = ctx.env_var(LCIC_ENDPOINT) {
            cfg.endpoint = endpoint;
        }

        Ok(cfg)
    }

    /// Full URL requests are posted to.
    pub fn endpoint_url(&self) -> String {
        if self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://") {
            self.endpoint.clone()
        } else {
            format!("https://{}", self.endpoint)
        }
    }

    /// Host and port of the endpoint, as used in the `Host` header.
    ///
    /// Any path in the endpoint is not part of the host.
    pub fn host(&self) -> Result<String> {
        let url = self.endpoint_url();
        let uri: http::Uri = url
            .parse()
            .map_err(|e| Error::config_invalid(format!("invalid endpoint: {url}")).with_source(e))?;
        let host = uri
            .host()
            .ok_or_else(|| Error::config_invalid(format!("endpoint has no host: {url}")))?;

        Ok(match uri.port_u16() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }

    /// Build a static credential from this config if secret id and key are set.
    pub fn credential(&self) -> Option<Credential> {
        match (&self.secret_id, &self.secret_key) {
            (Some(id), Some(key)) => Some(Credential::new(id, key, self.app_id.unwrap_or_default())),
            _ => None,
        }
    }
}

pub(crate) fn parse_app_id(v: &str) -> Result<u64> {
    v.trim()
        .parse()
        .map_err(|e| Error::config_invalid(format!("invalid sdk app id: {v}")).with_source(e))
}
