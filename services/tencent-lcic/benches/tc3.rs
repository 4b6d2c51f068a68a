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

use criterion::{criterion_group, criterion_main, Criterion};
use tcsign_core::hash::hex_hmac_sha256;
use tcsign_core::time::now;
use tcsign_tencent_lcic::{
    authorization, generate_signing_key, string_to_sign, CanonicalRequest, SigningContext,
};

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("tc3");
    let payload = br#"{"SdkAppId":1400000001,"Limit":10}"#;

    group.bench_function("sign", |b| {
        b.iter(|| {
            let signing = SigningContext::new(now());
            let creq = CanonicalRequest::new(
                "lcic.tencentcloudapi.com",
                "application/json; charset=utf-8",
                "GetRooms",
                payload,
            );
            let key = generate_signing_key("secret_key", &signing.date);
            let signature = hex_hmac_sha256(&key, string_to_sign(&creq, &signing).as_bytes());
            authorization("secret_id", &signing, &signature)
        })
    });

    group.finish();
}
