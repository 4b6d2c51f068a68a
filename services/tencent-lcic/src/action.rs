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

//! Typed LCIC actions and their results.

use crate::response::{decode_create_room, decode_get_rooms, decode_register_user};
use crate::{Config, Envelope, Outcome};
use serde::Serialize;
use tcsign_core::time::DateTime;

/// An LCIC API action.
///
/// The action serializes into the request payload; [`Client`](crate::Client)
/// adds `SdkAppId` from the credential snapshot used to sign the request.
pub trait Action: Serialize + Send + Sync {
    /// Action name, sent as `X-TC-Action`.
    const NAME: &'static str;

    /// Typed result of this action.
    type Output: Send;

    /// Decode the response envelope of this action.
    fn decode(&self, envelope: &Envelope, config: &Config) -> Outcome<Self::Output>;
}

/// Payload actually sent on the wire.
#[derive(Serialize)]
pub(crate) struct Payload<'a, A> {
    #[serde(rename = "SdkAppId")]
    pub sdk_app_id: u64,
    #[serde(flatten)]
    pub action: &'a A,
}

/// Register a user under the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterUser {
    /// User id in the caller's own system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Result of [`RegisterUser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRegistration {
    /// `UserId` assigned by LCIC.
    pub user_id: String,
    /// Login token for the user.
    pub token: String,
}

impl Action for RegisterUser {
    const NAME: &'static str = "RegisterUser";
    type Output = UserRegistration;

    fn decode(&self, envelope: &Envelope, _: &Config) -> Outcome<UserRegistration> {
        decode_register_user(envelope)
    }
}

/// Create a classroom.
///
/// Room creation is not idempotent: calling again after a timeout may create a
/// second room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRoom {
    /// Room name.
    pub name: String,
    /// Unix timestamp the class starts at.
    pub start_time: i64,
    /// Unix timestamp the class ends at.
    pub end_time: i64,
    /// `UserId` of the teacher.
    pub teacher_id: String,
    /// 0 small class, 1 large class.
    pub room_type: u32,
    /// 1 standard, 2 high, 3 full high definition.
    pub resolution: u32,
    /// Max number of students on mic.
    pub max_mic_number: u32,
    /// `videodoc`, `video` or `coteaching`.
    pub sub_type: String,
    /// 0 landscape, 1 portrait.
    pub video_orientation: u32,
}

impl CreateRoom {
    /// Create a video room for `teacher_id` between `start_time` and `end_time`.
    pub fn new(
        name: impl Into<String>,
        teacher_id: impl Into<String>,
        start_time: i64,
        end_time: i64,
    ) -> Self {
        Self {
            name: name.into(),
            start_time,
            end_time,
            teacher_id: teacher_id.into(),
            room_type: 1,
            resolution: 1,
            max_mic_number: 1,
            sub_type: "video".to_string(),
            video_orientation: 0,
        }
    }

    /// A thirty minute demo room starting ten seconds after `now`.
    pub fn demo(teacher_id: impl Into<String>, now: DateTime) -> Self {
        let start = now.timestamp();
        Self::new(
            format!("Interactive classroom demo: {}", now.format("%H:%M")),
            teacher_id,
            start + 10,
            start + 30 * 60,
        )
    }
}

/// Result of [`CreateRoom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCreation {
    /// Numeric room id rendered as string.
    pub room_id: String,
    /// Room name.
    pub room_name: String,
}

impl Action for CreateRoom {
    const NAME: &'static str = "CreateRoom";
    type Output = RoomCreation;

    fn decode(&self, envelope: &Envelope, config: &Config) -> Outcome<RoomCreation> {
        decode_create_room(envelope, &self.name, config.room_name_source)
    }
}

/// List rooms of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRooms {
    /// Page size.
    pub limit: u32,
    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl Default for GetRooms {
    fn default() -> Self {
        Self {
            limit: 10,
            page: None,
        }
    }
}

/// One entry of [`GetRooms`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    /// Room id.
    pub room_id: String,
    /// Room name.
    pub room_name: String,
}

impl Action for GetRooms {
    const NAME: &'static str = "GetRooms";
    type Output = Vec<RoomSummary>;

    fn decode(&self, envelope: &Envelope, _: &Config) -> Outcome<Vec<RoomSummary>> {
        decode_get_rooms(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tcsign_core::time::from_timestamp;

    fn payload<A: Action>(app_id: u64, action: &A) -> String {
        serde_json::to_string(&Payload {
            sdk_app_id: app_id,
            action,
        })
        .expect("payload must serialize")
    }

    #[test]
    fn test_register_user_payload() {
        assert_eq!(
            payload(1400000001, &RegisterUser::default()),
            r#"{"SdkAppId":1400000001}"#
        );

        let action = RegisterUser {
            name: Some("alice".to_string()),
            ..Default::default()
        };
        assert_eq!(
            payload(1400000001, &action),
            r#"{"SdkAppId":1400000001,"Name":"alice"}"#
        );
    }

    #[test]
    fn test_get_rooms_payload() {
        assert_eq!(
            payload(1, &GetRooms::default()),
            r#"{"SdkAppId":1,"Limit":10}"#
        );
    }

    #[test]
    fn test_create_room_payload() {
        let action = CreateRoom::new("math", "teacher-1", 100, 200);
        assert_eq!(
            payload(1, &action),
            concat!(
                r#"{"SdkAppId":1,"Name":"math","StartTime":100,"EndTime":200,"#,
                r#""TeacherId":"teacher-1","RoomType":1,"Resolution":1,"MaxMicNumber":1,"#,
                r#""SubType":"video","VideoOrientation":0}"#
            )
        );
    }

    #[test]
    fn test_create_room_demo() {
        let now = from_timestamp(1_700_000_000).expect("must be valid");
        let action = CreateRoom::demo("teacher-1", now);

        assert_eq!(action.start_time, 1_700_000_010);
        assert_eq!(action.end_time, 1_700_001_800);
        assert_eq!(action.name, "Interactive classroom demo: 22:13");
        assert_eq!(action.sub_type, "video");
    }
}
