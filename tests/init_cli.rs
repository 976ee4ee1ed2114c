mod support;

use predicates::prelude::*;
use support::TestStore;

#[test]
fn init_creates_empty_snapshot() {
    let store = TestStore::new();
    let value = store.json(&["init"]);

    assert_eq!(value["schema_version"].as_str(), Some("anasa.v1"));
    assert_eq!(value["status"].as_str(), Some("success"));
    assert_eq!(value["data"]["users"].as_u64(), Some(0));
    assert_eq!(value["data"]["tasks"].as_u64(), Some(0));
    assert!(store.snapshot_path().exists());
}

#[test]
fn init_demo_seeds_fixture() {
    let store = TestStore::new();
    let value = store.json(&["init", "--demo"]);

    assert_eq!(value["data"]["users"].as_u64(), Some(3));
    assert_eq!(value["data"]["projects"].as_u64(), Some(3));
    assert_eq!(value["data"]["tasks"].as_u64(), Some(5));
}

#[test]
fn init_refuses_existing_store() {
    let store = TestStore::new();
    store.cmd().arg("init").assert().success();
    store.cmd().arg("init").assert().failure().code(2);
}

#[test]
fn commands_fail_without_store() {
    let store = TestStore::new();
    store
        .cmd()
        .args(["project", "list"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("anasa init"));
}

#[test]
fn config_can_relocate_data_dir() {
    let store = TestStore::new();
    store
        .write_config("[store]\ndir = \".tracker\"\n")
        .expect("write config");
    store.cmd().arg("init").assert().success();

    assert!(store.path().join(".tracker").join("store.json").exists());
    assert!(!store.snapshot_path().exists());
}

#[test]
fn json_error_envelope_has_kind_and_code() {
    let store = TestStore::new();
    let output = store
        .cmd()
        .args(["project", "list", "--json"])
        .assert()
        .failure()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("error envelope");

    assert_eq!(value["status"].as_str(), Some("error"));
    assert_eq!(value["command"].as_str(), Some("project list"));
    assert_eq!(value["error"]["code"].as_i64(), Some(2));
    assert_eq!(value["error"]["kind"].as_str(), Some("user_error"));
}
