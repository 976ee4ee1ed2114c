mod support;

use serde_json::Value;
use support::TestStore;

#[test]
fn comments_are_appended_and_listed_in_order() {
    let store = TestStore::with_demo();
    let value = store.json(&[
        "comment", "add", "task-1", "On it.", "--user", "user-1",
    ]);
    assert_eq!(value["data"]["author_id"].as_str(), Some("user-1"));

    let value = store.json(&["comment", "list", "task-1"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(3));
    let comments = value["data"]["comments"].as_array().expect("comments");
    assert_eq!(comments[0]["id"].as_str(), Some("comment-1"));
    assert_eq!(comments[2]["content"].as_str(), Some("On it."));
}

#[test]
fn comment_requires_acting_user() {
    let store = TestStore::with_demo();
    store
        .cmd()
        .args(["comment", "add", "task-1", "Anonymous?"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn attachments_embed_file_payloads() {
    let store = TestStore::with_demo();
    store
        .write_file("notes.txt", b"hello")
        .expect("write fixture");

    let value = store.json(&[
        "attach", "add", "task-3", "notes.txt", "--type", "text/plain", "--user", "user-1",
    ]);
    let stored = value["data"]["stored"].as_array().expect("stored");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["file_name"].as_str(), Some("notes.txt"));

    // The payload lands in the snapshot as a data URL.
    let snapshot = std::fs::read_to_string(store.snapshot_path()).expect("snapshot");
    let parsed: Value = serde_json::from_str(&snapshot).expect("snapshot json");
    let attachment = parsed["attachments"]
        .as_array()
        .expect("attachments")
        .iter()
        .find(|a| a["file_name"].as_str() == Some("notes.txt"))
        .expect("stored attachment");
    assert_eq!(
        attachment["file_url"].as_str(),
        Some("data:text/plain;base64,aGVsbG8=")
    );
}

#[test]
fn attachment_batch_is_all_or_nothing() {
    let store = TestStore::with_demo();
    store.write_file("a.txt", b"a").expect("write fixture");

    // b.txt does not exist: the whole batch must fail before anything is
    // stored.
    store
        .cmd()
        .args(["attach", "add", "task-3", "a.txt", "b.txt", "--user", "user-1"])
        .assert()
        .failure()
        .code(2);

    let value = store.json(&["attach", "list", "task-3"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(0));
}

#[test]
fn list_and_remove_attachments() {
    let store = TestStore::with_demo();
    let value = store.json(&["attach", "list", "task-1"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(1));
    assert_eq!(
        value["data"]["attachments"][0]["id"].as_str(),
        Some("att-1")
    );

    store
        .cmd()
        .args(["attach", "rm", "att-1"])
        .assert()
        .success();
    let value = store.json(&["attach", "list", "task-1"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(0));
}
