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

// Service identity of Tencent Cloud LCIC (Low-code Interactive Classroom).
pub const SERVICE: &str = "lcic";
pub const DEFAULT_HOST: &str = "lcic.tencentcloudapi.com";
pub const API_VERSION: &str = "2022-08-17";

// TC3 signing.
pub const ALGORITHM: &str = "TC3-HMAC-SHA256";
pub const KEY_PREFIX: &str = "TC3";
pub const TC3_REQUEST: &str = "tc3_request";
pub const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

// Headers used in tencent cloud api 3.0.
pub const X_TC_ACTION: &str = "x-tc-action";
pub const X_TC_TIMESTAMP: &str = "x-tc-timestamp";
pub const X_TC_VERSION: &str = "x-tc-version";
pub const X_TC_REGION: &str = "x-tc-region";

// Env values used in tencent cloud services.
pub const TENCENTCLOUD_REGION: &str = "TENCENTCLOUD_REGION";
pub const TENCENTCLOUD_SECRET_ID: &str = "TENCENTCLOUD_SECRET_ID";
pub const TENCENTCLOUD_SECRET_KEY: &str = "TENCENTCLOUD_SECRET_KEY";
pub const LCIC_SDK_APP_ID: &str = "LCIC_SDK_APP_ID";
pub const LCIC_ENDPOINT: &str = "LCIC_ENDPOINT";
