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

use anyhow::Result;
use tcsign_core::{Context, OsEnv};
use tcsign_http_send_reqwest::ReqwestHttpSend;
use tcsign_tencent_lcic::{Client, Config, CreateRoom, CredentialStore, GetRooms, RegisterUser};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::from_env(&ctx)?;

    let store = CredentialStore::new();
    match config.credential() {
        Some(cred) => store.configure(cred.secret_id, cred.secret_key, cred.app_id),
        None => {
            println!("TENCENTCLOUD_SECRET_ID/TENCENTCLOUD_SECRET_KEY not set, using demo credentials");
            store.configure("AKIDEXAMPLE", "EXAMPLEKEY", 1400000001);
        }
    }

    let client = Client::new(ctx, config, store);

    println!("Registering a teacher");
    let teacher = client.call(&RegisterUser::default()).await?;
    println!("teacher user id: {}", teacher.user_id);

    println!("Creating a demo room");
    let room = client
        .call(&CreateRoom::demo(teacher.user_id, tcsign_core::time::now()))
        .await?;
    println!("room {} created: {}", room.room_id, room.room_name);

    println!("Listing rooms");
    for room in client.call(&GetRooms::default()).await? {
        println!("- {} {}", room.room_id, room.room_name);
    }

    Ok(())
}
