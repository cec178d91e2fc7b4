// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

const TOKENS: &str = r#"[
    {
        "name": "Editor",
        "accessToken": "editor",
        "permissions": [
            "sections.s-news:read",
            "entrytypes.t-article:read",
            "sections.s-blog:write"
        ]
    },
    { "name": "Retired", "accessToken": "retired", "enabled": false, "permissions": [] }
]"#;

const CONTENT: &str = r#"{
    "sections": [
        {
            "uid": "s-news",
            "handle": "news",
            "entryTypes": [{ "uid": "t-article", "handle": "article", "fields": ["body"] }]
        }
    ],
    "matrixFields": [
        {
            "uid": "f-body",
            "handle": "body",
            "blockTypes": [{ "uid": "b-text", "handle": "text" }]
        }
    ]
}"#;

fn gql<'a>(cwd: impl AsRef<Path>, args: impl IntoIterator<Item = &'a str>) -> Output {
    let bin = env!("CARGO_BIN_EXE_gql");

    Command::new(bin)
        .current_dir(cwd)
        .env_remove("GQL_TOKENS_FILE")
        .env_remove("GQL_CONTENT_FILE")
        .env_remove("GQL_DEV_MODE")
        .args(args)
        .output()
        .expect("Failed to run gql")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).replace('\r', "")
}

fn project_dir() -> tempfile::TempDir {
    let tmp_dir =
        tempfile::tempdir_in(env!("CARGO_TARGET_TMPDIR")).expect("Failed to create tempdir");
    fs::write(tmp_dir.path().join("tokens.json"), TOKENS).unwrap();
    fs::write(tmp_dir.path().join("content.json"), CONTENT).unwrap();
    tmp_dir
}

#[test]
fn prints_schema_for_token() {
    let dir = project_dir();

    let output = gql(
        dir.path(),
        [
            "schema", "print", "--tokens", "tokens.json", "--content", "content.json", "--token",
            "editor",
        ],
    );
    assert!(output.status.success());

    let sdl = stdout(&output);
    assert!(sdl.contains("type Query {"));
    assert!(sdl.contains("  entries("));
    assert!(sdl.contains("interface EntryInterface {"));
}

#[test]
fn anonymous_schema_only_has_ping() {
    let dir = project_dir();

    let output = gql(dir.path(), ["schema", "print", "--content", "content.json"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(
        "type Query {\n  \"\"\"This query is used to test API connectivity.\"\"\"\n  ping: String\n}\n"
    ));
}

#[test]
fn checks_schema_in_dev_mode() {
    let dir = project_dir();

    let output = gql(
        dir.path(),
        [
            "schema", "check", "--tokens", "tokens.json", "--content", "content.json", "--token",
            "editor",
        ],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("Schema is valid"));
}

#[test]
fn lists_token_scopes() {
    let dir = project_dir();

    let output = gql(
        dir.path(),
        ["token", "scopes", "--tokens", "tokens.json", "--token", "editor"],
    );
    assert!(output.status.success());

    let scopes: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        scopes,
        serde_json::json!({ "entrytypes": ["t-article"], "sections": ["s-news"] })
    );

    let output = gql(
        dir.path(),
        ["token", "scopes", "--tokens", "tokens.json", "--token", "editor", "--action", "write"],
    );
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&stdout(&output)).unwrap(),
        serde_json::json!({ "sections": ["s-blog"] })
    );
}

#[test]
fn disabled_token_fails() {
    let dir = project_dir();

    let output = gql(
        dir.path(),
        ["token", "scopes", "--tokens", "tokens.json", "--token", "retired"],
    );
    assert!(!output.status.success());
}
