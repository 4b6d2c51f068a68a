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

use std::fmt::{Debug, Formatter};
use tcsign_core::utils::Redact;
use tcsign_core::SigningCredential;

/// Credential for Tencent Cloud LCIC.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Secret ID, the identity part of the signature scope.
    pub secret_id: String,
    /// Secret Key, only ever used as HMAC input.
    pub secret_key: String,
    /// Numeric application id, sent as `SdkAppId` in payloads.
    pub app_id: u64,
}

impl Credential {
    /// Create a new credential.
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>, app_id: u64) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            app_id,
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("secret_id", &Redact::from(&self.secret_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("app_id", &self.app_id)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.secret_id.is_empty() && !self.secret_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let cred = Credential::new(
            "AKIDz8krbsJ5yKBZQpn74WFkmLPx3",
            "Gu5t9xGARNpq86cd98joQYCN3",
            1400000001,
        );
        let s = format!("{cred:?}");

        assert!(s.contains("AKI***Px3"));
        assert!(!s.contains("Gu5t9xGARNpq86cd98joQYCN3"));
        assert!(s.contains("1400000001"));
    }

    #[test]
    fn test_is_valid() {
        assert!(Credential::new("AKID1", "SECRET1", 1).is_valid());
        assert!(!Credential::new("", "SECRET1", 1).is_valid());
        assert!(!Credential::new("AKID1", "", 1).is_valid());
        assert!(!Credential::default().is_valid());
    }
}
