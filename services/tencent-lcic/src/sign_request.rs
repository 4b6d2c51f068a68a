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
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HOST};
use http::{HeaderValue, Method};
use log::debug;
use std::fmt::{self, Display};
use tcsign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use tcsign_core::time::{format_date, now, DateTime};
use tcsign_core::{Context, Error, Result, SignRequest};

/// RequestSigner that implements TC3-HMAC-SHA256.
///
/// - [Signature v3](https://www.tencentcloud.com/document/api/213/33224)
///
/// The signer reads `Content-Type`, `Host` and `X-TC-Action` from the request,
/// hashes the request body, and writes `X-TC-Timestamp` and `Authorization`.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for Tencent Cloud API 3.0.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut http::Request<Bytes>,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Err(Error::credential_invalid(
                "no credential available to sign the request",
            ));
        };

        let signing = SigningContext::new(self.time.unwrap_or_else(now));
        canonicalize_header(req, &signing)?;

        let creq = CanonicalRequest::from_request(req)?;
        debug!("calculated canonical request: {creq}");

        let string_to_sign = string_to_sign(&creq, &signing);
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(&cred.secret_key, &signing.date);
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut value = HeaderValue::from_str(&authorization(&cred.secret_id, &signing, &signature))?;
        value.set_sensitive(true);
        req.headers_mut().insert(AUTHORIZATION, value);

        Ok(())
    }
}

/// Time dependent part of one signature.
///
/// All three fields come from the same instant: the server rebuilds the
/// scope from `X-TC-Timestamp`, so a date from another instant breaks the
/// signature silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    /// Unix timestamp in seconds, sent as `X-TC-Timestamp`.
    pub timestamp: i64,
    /// UTC date of `timestamp`, `2023-11-14`.
    pub date: String,
    /// `{date}/lcic/tc3_request`
    pub credential_scope: String,
}

impl SigningContext {
    /// Build the signing context for `time`.
    pub fn new(time: DateTime) -> Self {
        let date = format_date(time);
        Self {
            timestamp: time.timestamp(),
            credential_scope: format!("{date}/{SERVICE}/{TC3_REQUEST}"),
            date,
        }
    }
}

/// Canonical form of a TC3 request.
///
/// Method, uri and query are fixed for this API, everything is carried by
/// the signed headers and the body. Display renders the string that gets
/// hashed into the string to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// Always `POST`.
    pub method: Method,
    /// Always `/`.
    pub uri: String,
    /// Always empty.
    pub query: String,
    /// `content-type:..\nhost:..\nx-tc-action:..\n`
    pub canonical_headers: String,
    /// `content-type;host;x-tc-action`
    pub signed_headers: String,
    /// Lowercase hex SHA-256 of the body.
    pub hashed_payload: String,
}

impl CanonicalRequest {
    /// Build a canonical request from its inputs.
    ///
    /// `payload` must be the exact body that is transmitted.
    pub fn new(host: &str, content_type: &str, action: &str, payload: &[u8]) -> Self {
        Self {
            method: Method::POST,
            uri: "/".to_string(),
            query: String::new(),
            canonical_headers: format!(
                "content-type:{content_type}\nhost:{host}\n{X_TC_ACTION}:{}\n",
                action.to_lowercase()
            ),
            signed_headers: SIGNED_HEADERS.to_string(),
            hashed_payload: hex_sha256(payload),
        }
    }

    /// Build a canonical request from the headers and body of `req`.
    pub fn from_request(req: &http::Request<Bytes>) -> Result<Self> {
        if req.method() != Method::POST {
            return Err(Error::request_invalid(format!(
                "TC3 signing requires POST, got {}",
                req.method()
            )));
        }

        Ok(Self::new(
            header_value(req, HOST.as_str())?,
            header_value(req, CONTENT_TYPE.as_str())?,
            header_value(req, X_TC_ACTION)?,
            req.body(),
        ))
    }
}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.uri)?;
        writeln!(f, "{}", self.query)?;
        writeln!(f, "{}", self.canonical_headers)?;
        writeln!(f, "{}", self.signed_headers)?;
        write!(f, "{}", self.hashed_payload)
    }
}

/// Build the string to sign.
///
/// ```text
/// TC3-HMAC-SHA256
/// 1700000000
/// 2023-11-14/lcic/tc3_request
/// <hashed_canonical_request>
/// ```
pub fn string_to_sign(creq: &CanonicalRequest, signing: &SigningContext) -> String {
    format!(
        "{ALGORITHM}\n{}\n{}\n{}",
        signing.timestamp,
        signing.credential_scope,
        hex_sha256(creq.to_string().as_bytes())
    )
}

/// Derive the signing key for `date` through the HMAC chain
/// `"TC3" + secret` -> date -> service -> `tc3_request`.
pub fn generate_signing_key(secret: &str, date: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("{KEY_PREFIX}{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(&sign_date, SERVICE.as_bytes());
    // Sign request
    hmac_sha256(&sign_service, TC3_REQUEST.as_bytes())
}

/// Build the `Authorization` header value.
pub fn authorization(secret_id: &str, signing: &SigningContext, signature: &str) -> String {
    format!(
        "{ALGORITHM} Credential={secret_id}/{}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        signing.credential_scope
    )
}

fn canonicalize_header(req: &mut http::Request<Bytes>, signing: &SigningContext) -> Result<()> {
    // Insert HOST header if not present.
    if req.headers().get(HOST).is_none() {
        let host = match req.uri().authority() {
            Some(authority) => HeaderValue::from_str(authority.as_str())?,
            None => {
                return Err(Error::request_invalid(
                    "request without host is invalid for signing",
                ))
            }
        };
        req.headers_mut().insert(HOST, host);
    }

    if req.headers().get(CONTENT_TYPE).is_none() {
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
    }

    // Always overwrite, the timestamp must match the scope date.
    req.headers_mut()
        .insert(X_TC_TIMESTAMP, HeaderValue::from(signing.timestamp));

    Ok(())
}

fn header_value<'a>(req: &'a http::Request<Bytes>, name: &str) -> Result<&'a str> {
    let value = req
        .headers()
        .get(name)
        .ok_or_else(|| Error::request_invalid(format!("header {name} is required for signing")))?;
    Ok(value.to_str()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tcsign_core::time::from_timestamp;
    use tcsign_core::ErrorKind;
    use test_case::test_case;

    const PAYLOAD: &[u8] = br#"{"SdkAppId":1400000001}"#;

    const CANONICAL_REQUEST: &str = "POST
/

content-type:application/json; charset=utf-8
host:lcic.tencentcloudapi.com
x-tc-action:registeruser

content-type;host;x-tc-action
c06a55e066283dc292b4f07ded2b13369621703d7a8bd4c764180afddd09fdb3";

    const STRING_TO_SIGN: &str = "TC3-HMAC-SHA256
1700000000
2023-11-14/lcic/tc3_request
99f052b10e6c9de8b9fb3960638dc06e707238c4ca0c0c0cdfc51100aac77ca4";

    const SIGNING_KEY: &str = "dab4d996ab4af2c3fb3ec5a4e75d245aa42c246605218d402e82d29b92ed5fd6";

    const SIGNATURE: &str = "deed919a9f94645f3e1f3e449068142ee583e326a72fd4a75efe97a2d9c2e126";

    fn register_user_request() -> http::Request<Bytes> {
        http::Request::post("https://lcic.tencentcloudapi.com")
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(HOST, DEFAULT_HOST)
            .header(X_TC_ACTION, "RegisterUser")
            .body(Bytes::from_static(PAYLOAD))
            .expect("request must be valid")
    }

    fn fixed_time() -> DateTime {
        from_timestamp(1_700_000_000).expect("must be valid")
    }

    #[test]
    fn test_canonical_request_golden() -> Result<()> {
        let creq = CanonicalRequest::from_request(&register_user_request())?;
        assert_eq!(creq.to_string(), CANONICAL_REQUEST);
        Ok(())
    }

    #[test]
    fn test_canonical_request_is_deterministic() {
        let a = CanonicalRequest::new(DEFAULT_HOST, CONTENT_TYPE_JSON, "RegisterUser", PAYLOAD);
        let b = CanonicalRequest::new(DEFAULT_HOST, CONTENT_TYPE_JSON, "RegisterUser", PAYLOAD);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_hashed_payload_matches_body() -> Result<()> {
        let req = register_user_request();
        let creq = CanonicalRequest::from_request(&req)?;
        assert_eq!(creq.hashed_payload, hex_sha256(req.body()));
        Ok(())
    }

    #[test_case("RegisterUser", "x-tc-action:registeruser\n"; "register user")]
    #[test_case("CreateRoom", "x-tc-action:createroom\n"; "create room")]
    #[test_case("GetRooms", "x-tc-action:getrooms\n"; "get rooms")]
    fn test_action_is_lowercased(action: &str, expected: &str) {
        let creq = CanonicalRequest::new(DEFAULT_HOST, CONTENT_TYPE_JSON, action, b"{}");
        assert!(creq.canonical_headers.ends_with(expected));
    }

    #[test]
    fn test_string_to_sign_golden() {
        let creq = CanonicalRequest::new(DEFAULT_HOST, CONTENT_TYPE_JSON, "RegisterUser", PAYLOAD);
        let signing = SigningContext::new(fixed_time());

        assert_eq!(signing.date, "2023-11-14");
        assert_eq!(signing.credential_scope, "2023-11-14/lcic/tc3_request");
        assert_eq!(string_to_sign(&creq, &signing), STRING_TO_SIGN);
    }

    #[test]
    fn test_signing_key_golden() {
        let key = generate_signing_key("SECRET1", "2023-11-14");
        assert_eq!(hex::encode(&key), SIGNING_KEY);
        assert_eq!(key, generate_signing_key("SECRET1", "2023-11-14"));
        assert_eq!(hex_hmac_sha256(&key, STRING_TO_SIGN.as_bytes()), SIGNATURE);
    }

    #[test]
    fn test_signing_key_is_order_sensitive() {
        let swapped = {
            let k = hmac_sha256(b"TC3SECRET1", b"lcic");
            let k = hmac_sha256(&k, b"2023-11-14");
            hmac_sha256(&k, b"tc3_request")
        };

        assert_eq!(
            hex::encode(&swapped),
            "2c99b3aba3777133ddaa03d62d3d2900b9f63c4a1ba00801b9214adf8477b03f"
        );
        assert_ne!(swapped, generate_signing_key("SECRET1", "2023-11-14"));
    }

    #[test]
    fn test_signing_key_depends_on_date() {
        assert_ne!(
            generate_signing_key("SECRET1", "2023-11-14"),
            generate_signing_key("SECRET1", "2023-11-15")
        );
    }

    #[tokio::test]
    async fn test_sign_request_golden() -> Result<()> {
        let signer = RequestSigner::new().with_time(fixed_time());
        let cred = Credential::new("AKID1", "SECRET1", 1400000001);
        let mut req = register_user_request();

        signer
            .sign_request(&Context::new(), &mut req, Some(&cred))
            .await?;

        assert_eq!(req.headers()[X_TC_TIMESTAMP], "1700000000");
        assert_eq!(
            req.headers()[AUTHORIZATION],
            format!(
                "TC3-HMAC-SHA256 Credential=AKID1/2023-11-14/lcic/tc3_request, \
                 SignedHeaders=content-type;host;x-tc-action, Signature={SIGNATURE}"
            )
            .as_str()
        );
        assert!(req.headers()[AUTHORIZATION].is_sensitive());
        assert_eq!(req.body().as_ref(), PAYLOAD);
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_request_pins_timestamp_and_date() -> Result<()> {
        // 2022-03-13T23:59:59Z, one second before the date changes.
        let time = from_timestamp(1_647_215_999)?;
        let signer = RequestSigner::new().with_time(time);
        let cred = Credential::new("AKID1", "SECRET1", 1);
        let mut req = register_user_request();
        req.headers_mut()
            .insert(X_TC_TIMESTAMP, HeaderValue::from_static("1"));

        signer
            .sign_request(&Context::new(), &mut req, Some(&cred))
            .await?;

        assert_eq!(req.headers()[X_TC_TIMESTAMP], "1647215999");
        let auth = req.headers()[AUTHORIZATION].to_str()?;
        assert!(auth.contains("Credential=AKID1/2022-03-13/lcic/tc3_request"));
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_request_fills_host_and_content_type() -> Result<()> {
        let signer = RequestSigner::new().with_time(fixed_time());
        let cred = Credential::new("AKID1", "SECRET1", 1400000001);
        let mut req = http::Request::post("https://lcic.tencentcloudapi.com/")
            .header(X_TC_ACTION, "RegisterUser")
            .body(Bytes::from_static(PAYLOAD))?;

        signer
            .sign_request(&Context::new(), &mut req, Some(&cred))
            .await?;

        assert_eq!(req.headers()[HOST], DEFAULT_HOST);
        assert_eq!(req.headers()[CONTENT_TYPE], CONTENT_TYPE_JSON);
        assert!(req.headers()[AUTHORIZATION]
            .to_str()?
            .ends_with(&format!("Signature={SIGNATURE}")));
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_request_without_credential() {
        let mut req = register_user_request();
        let err = RequestSigner::new()
            .sign_request(&Context::new(), &mut req, None)
            .await
            .expect_err("must fail without credential");

        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_canonical_request_rejects_get() {
        let req = http::Request::get("https://lcic.tencentcloudapi.com")
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(HOST, DEFAULT_HOST)
            .header(X_TC_ACTION, "GetRooms")
            .body(Bytes::new())
            .expect("request must be valid");

        let err = CanonicalRequest::from_request(&req).expect_err("GET must be rejected");
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_canonical_request_requires_action() {
        let req = http::Request::post("https://lcic.tencentcloudapi.com")
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(HOST, DEFAULT_HOST)
            .body(Bytes::new())
            .expect("request must be valid");

        let err = CanonicalRequest::from_request(&req).expect_err("action is required");
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
