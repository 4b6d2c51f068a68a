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

//! Decoding of the `{"Response": {...}}` envelope.
//!
//! All functions here are pure: they look at an already parsed envelope and
//! never touch the network or the clock.

use crate::{Error, Result, RoomCreation, RoomNameSource, RoomSummary, UserRegistration};
use serde_json::{Map, Value};

/// Message used when `Response.Error` carries no `Message`.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// Envelope of every Tencent Cloud API 3.0 response body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    response: Map<String, Value>,
}

impl Envelope {
    /// Parse the raw body, which must be a JSON object.
    pub fn from_slice(bs: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(bs) {
            Ok(Value::Object(body)) => Ok(Self::from_body(body)),
            Ok(_) => Err(Error::InvalidJson(None)),
            Err(e) => Err(Error::InvalidJson(Some(e))),
        }
    }

    /// Build an envelope from a parsed body.
    ///
    /// A missing or non-object `Response` yields an empty envelope, which every
    /// decoder reports as malformed.
    pub fn from_body(mut body: Map<String, Value>) -> Self {
        let response = match body.remove("Response") {
            Some(Value::Object(response)) => response,
            _ => Map::new(),
        };
        Self { response }
    }

    /// Fields inside `Response`.
    pub fn response(&self) -> &Map<String, Value> {
        &self.response
    }

    /// `Response.RequestId`, useful when reporting issues to Tencent Cloud.
    pub fn request_id(&self) -> Option<&str> {
        self.response.get("RequestId").and_then(Value::as_str)
    }

    /// `Response.Error` as an outcome, if it is an object.
    ///
    /// Any other shape, `null` included, is not an error report and leaves the
    /// success fields to be decoded.
    pub fn error<T>(&self) -> Option<Outcome<T>> {
        let Some(Value::Object(error)) = self.response.get("Error") else {
            return None;
        };
        let code = error.get("Code").and_then(Value::as_str).map(str::to_string);
        let message = error
            .get("Message")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_string();

        Some(Outcome::RemoteError { code, message })
    }

    fn string(&self, field: &str) -> std::result::Result<String, String> {
        match self.response.get(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(format!("field {field} is not a string")),
            None => Err(format!("missing field {field}")),
        }
    }
}

/// Result of decoding one action response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// All required fields were present.
    Success(T),
    /// The server reported `Response.Error`.
    RemoteError {
        /// `Error.Code`
        code: Option<String>,
        /// `Error.Message`, or a placeholder if absent.
        message: String,
    },
    /// Required fields are missing or have the wrong type.
    Malformed(String),
}

impl<T> Outcome<T> {
    /// Whether this outcome carries a value.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Map the success value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(v) => Outcome::Success(f(v)),
            Outcome::RemoteError { code, message } => Outcome::RemoteError { code, message },
            Outcome::Malformed(reason) => Outcome::Malformed(reason),
        }
    }

    /// Convert into the crate result type.
    pub fn into_result(self) -> Result<T> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::RemoteError { code, message } => Err(Error::Remote { code, message }),
            Outcome::Malformed(reason) => Err(Error::MalformedResponse(reason)),
        }
    }
}

impl<T> From<std::result::Result<T, String>> for Outcome<T> {
    fn from(r: std::result::Result<T, String>) -> Self {
        match r {
            Ok(v) => Outcome::Success(v),
            Err(reason) => Outcome::Malformed(reason),
        }
    }
}

/// Decode a `RegisterUser` response: requires `UserId` and `Token`.
pub fn decode_register_user(envelope: &Envelope) -> Outcome<UserRegistration> {
    if let Some(err) = envelope.error() {
        return err;
    }

    let user = || -> std::result::Result<_, String> {
        Ok(UserRegistration {
            user_id: envelope.string("UserId")?,
            token: envelope.string("Token")?,
        })
    };
    user().into()
}

/// Decode a `CreateRoom` response: requires a numeric `RoomId`.
///
/// The room name comes from `requested_name` or `Response.Name` depending on
/// `source`.
pub fn decode_create_room(
    envelope: &Envelope,
    requested_name: &str,
    source: RoomNameSource,
) -> Outcome<RoomCreation> {
    if let Some(err) = envelope.error() {
        return err;
    }

    let room_id = match envelope.response.get("RoomId") {
        Some(Value::Number(n)) if n.is_u64() || n.is_i64() => n.to_string(),
        Some(_) => return Outcome::Malformed("field RoomId is not an integer".to_string()),
        None => return Outcome::Malformed("missing field RoomId".to_string()),
    };

    let room_name = match source {
        RoomNameSource::Request => requested_name.to_string(),
        RoomNameSource::Response => envelope
            .response
            .get("Name")
            .and_then(Value::as_str)
            .unwrap_or(requested_name)
            .to_string(),
    };

    Outcome::Success(RoomCreation { room_id, room_name })
}

/// Decode a `GetRooms` response: requires a `Rooms` list of objects.
///
/// `RoomId` and `Name` are accepted as strings or numbers, rooms keep the
/// order the server returned them in.
pub fn decode_get_rooms(envelope: &Envelope) -> Outcome<Vec<RoomSummary>> {
    if let Some(err) = envelope.error() {
        return err;
    }

    let Some(Value::Array(rooms)) = envelope.response.get("Rooms") else {
        return Outcome::Malformed("missing list field Rooms".to_string());
    };

    rooms
        .iter()
        .map(|room| match room {
            Value::Object(room) => Ok(RoomSummary {
                room_id: coerce_string(room.get("RoomId")),
                room_name: coerce_string(room.get("Name")),
            }),
            _ => Err("entry of Rooms is not an object".to_string()),
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .into()
}

fn coerce_string(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
    }
}
