mod support;

use support::TestStore;

#[test]
fn add_and_list_labels() {
    let store = TestStore::with_demo();
    let value = store.json(&["label", "add", "blocked-upstream", "--color", "#ff0000"]);
    let id = value["data"]["id"].as_str().expect("label id");
    assert!(id.starts_with("label-"));
    assert_eq!(value["data"]["color"].as_str(), Some("#ff0000"));

    let value = store.json(&["label", "list"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(5));
}

#[test]
fn tasks_carry_resolved_label_ids() {
    let store = TestStore::with_demo();
    let value = store.json(&[
        "task", "new", "Tag me", "--project", "proj-1", "--label", "label-1", "--label",
        "label-2",
    ]);
    let labels = value["data"]["label_ids"].as_array().expect("label ids");
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].as_str(), Some("label-1"));
}

#[test]
fn unknown_label_is_rejected() {
    let store = TestStore::with_demo();
    store
        .cmd()
        .args(["task", "new", "Tag me", "--project", "proj-1", "--label", "label-99"])
        .assert()
        .failure()
        .code(2);
}
