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

//! Time related utils.

use crate::{Error, Result};
use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date: `2022-03-13`
///
/// The date is always rendered in UTC so that it agrees with the unix
/// timestamp taken from the same instant.
pub fn format_date(t: DateTime) -> String {
    t.format("%Y-%m-%d").to_string()
}

/// Build datetime from a unix timestamp in seconds.
pub fn from_timestamp(secs: i64) -> Result<DateTime> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| Error::unexpected(format!("timestamp {secs} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_date() {
        let t = from_timestamp(1_700_000_000).expect("must be valid");
        assert_eq!(format_date(t), "2023-11-14");
    }

    #[test]
    fn test_format_date_at_utc_midnight() {
        // 2022-03-13T23:59:59Z and 2022-03-14T00:00:00Z
        let before = from_timestamp(1_647_215_999).expect("must be valid");
        let after = from_timestamp(1_647_216_000).expect("must be valid");

        assert_eq!(format_date(before), "2022-03-13");
        assert_eq!(format_date(after), "2022-03-14");
    }

    #[test]
    fn test_from_timestamp_out_of_range() {
        assert!(from_timestamp(i64::MAX).is_err());
    }
}
