mod support;

use support::TestStore;

fn add_user(store: &TestStore, first: &str, last: &str, email: &str) -> String {
    let value = store.json(&["user", "add", first, last, "--email", email]);
    value["data"]["id"].as_str().expect("user id").to_string()
}

#[test]
fn add_and_list_users() {
    let store = TestStore::new();
    store.cmd().arg("init").assert().success();

    let id = add_user(&store, "Ada", "Lovelace", "ada@example.com");
    assert!(id.starts_with("user-"));

    let value = store.json(&["user", "list"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(1));
    assert_eq!(value["data"]["users"][0]["first_name"].as_str(), Some("Ada"));
}

#[test]
fn edit_user_reports_changes() {
    let store = TestStore::new();
    store.cmd().arg("init").assert().success();
    let id = add_user(&store, "Ada", "Lovelace", "ada@example.com");

    let value = store.json(&["user", "edit", &id, "--email", "countess@example.com"]);
    assert_eq!(value["data"]["changed"].as_bool(), Some(true));

    // Same value again: nothing to change.
    let value = store.json(&["user", "edit", &id, "--email", "countess@example.com"]);
    assert_eq!(value["data"]["changed"].as_bool(), Some(false));
}

#[test]
fn use_persists_acting_user() {
    let store = TestStore::with_demo();
    store.cmd().args(["user", "use", "user-2"]).assert().success();

    let value = store.json(&["user", "current"]);
    assert_eq!(value["data"]["id"].as_str(), Some("user-2"));
    assert_eq!(value["data"]["source"].as_str(), Some("store"));
    assert_eq!(value["data"]["display_name"].as_str(), Some("Bob Johnson"));
}

#[test]
fn flag_overrides_persisted_user() {
    let store = TestStore::with_demo();
    store.cmd().args(["user", "use", "user-2"]).assert().success();

    let value = store.json(&["user", "current", "--user", "user-1"]);
    assert_eq!(value["data"]["id"].as_str(), Some("user-1"));
    assert_eq!(value["data"]["source"].as_str(), Some("flag"));
}

#[test]
fn use_rejects_unknown_user() {
    let store = TestStore::with_demo();
    store
        .cmd()
        .args(["user", "use", "user-99"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn gated_commands_require_acting_user() {
    let store = TestStore::with_demo();
    store
        .cmd()
        .args(["project", "new", "Skunkworks"])
        .assert()
        .failure()
        .code(2);
}
