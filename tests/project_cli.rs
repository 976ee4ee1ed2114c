mod support;

use serde_json::Value;
use support::TestStore;

#[test]
fn new_project_makes_creator_admin() {
    let store = TestStore::with_demo();
    let value = store.json(&["project", "new", "Skunkworks", "--user", "user-3"]);

    let id = value["data"]["id"].as_str().expect("project id");
    assert!(id.starts_with("proj-"));
    assert_eq!(value["data"]["privacy"].as_str(), Some("restricted"));
    assert_eq!(value["data"]["members"][0]["user_id"].as_str(), Some("user-3"));
    assert_eq!(value["data"]["members"][0]["role"].as_str(), Some("admin"));
}

#[test]
fn rename_and_privacy_are_admin_gated() {
    let store = TestStore::with_demo();

    // user-2 is a plain member of proj-1.
    store
        .cmd()
        .args(["project", "rename", "proj-1", "Relaunch", "--user", "user-2"])
        .assert()
        .failure()
        .code(3);

    store
        .cmd()
        .args(["project", "rename", "proj-1", "Relaunch", "--user", "user-1"])
        .assert()
        .success();
    store
        .cmd()
        .args(["project", "privacy", "proj-1", "public", "--user", "user-1"])
        .assert()
        .success();

    let value = store.json(&["project", "show", "proj-1"]);
    assert_eq!(value["data"]["name"].as_str(), Some("Relaunch"));
    assert_eq!(value["data"]["privacy"].as_str(), Some("public"));
}

#[test]
fn creator_role_is_immutable() {
    let store = TestStore::with_demo();
    store
        .cmd()
        .args(["project", "role", "proj-1", "user-1", "member", "--user", "user-1"])
        .assert()
        .failure()
        .code(3);
    store
        .cmd()
        .args(["project", "remove-member", "proj-1", "user-1", "--user", "user-1"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn member_roles_can_change() {
    let store = TestStore::with_demo();
    store
        .cmd()
        .args(["project", "role", "proj-1", "user-2", "admin", "--user", "user-1"])
        .assert()
        .success();

    // user-2 can now rename.
    store
        .cmd()
        .args(["project", "rename", "proj-1", "Handover", "--user", "user-2"])
        .assert()
        .success();
}

#[test]
fn join_lifecycle() {
    let store = TestStore::with_demo();

    // user-3 already has a pending request for proj-1 in the demo data.
    store
        .cmd()
        .args(["project", "join", "proj-1", "--user", "user-3"])
        .assert()
        .failure()
        .code(3);

    let value = store.json(&["project", "requests", "proj-1"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(1));
    assert_eq!(
        value["data"]["requests"][0]["user_id"].as_str(),
        Some("user-3")
    );

    // Approval is admin-gated.
    store
        .cmd()
        .args(["project", "approve", "proj-1", "user-3", "--user", "user-2"])
        .assert()
        .failure()
        .code(3);

    store
        .cmd()
        .args(["project", "approve", "proj-1", "user-3", "--user", "user-1"])
        .assert()
        .success();

    let value = store.json(&["project", "show", "proj-1"]);
    let members = value["data"]["members"].as_array().expect("members");
    let entries: Vec<&Value> = members
        .iter()
        .filter(|member| member["user_id"].as_str() == Some("user-3"))
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["role"].as_str(), Some("member"));
    assert_eq!(value["data"]["join_requests"].as_array().map(Vec::len), Some(0));

    // Membership now rejects a fresh request.
    store
        .cmd()
        .args(["project", "join", "proj-1", "--user", "user-3"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn deny_removes_request_without_membership() {
    let store = TestStore::with_demo();
    store
        .cmd()
        .args(["project", "deny", "proj-1", "user-3", "--user", "user-1"])
        .assert()
        .success();

    let value = store.json(&["project", "show", "proj-1"]);
    assert_eq!(value["data"]["join_requests"].as_array().map(Vec::len), Some(0));
    assert_eq!(value["data"]["members"].as_array().map(Vec::len), Some(2));

    // The user can request again after denial.
    store
        .cmd()
        .args(["project", "join", "proj-1", "--user", "user-3"])
        .assert()
        .success();
}

#[test]
fn delete_cascades_to_tasks() {
    let store = TestStore::with_demo();
    let value = store.json(&["project", "delete", "proj-1", "--user", "user-1"]);
    assert_eq!(value["data"]["tasks_removed"].as_u64(), Some(5));

    store
        .cmd()
        .args(["task", "list", "proj-1"])
        .assert()
        .failure()
        .code(2);

    let value = store.json(&["project", "list"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(2));
}

#[test]
fn joinable_lists_non_member_projects() {
    let store = TestStore::with_demo();
    let value = store.json(&["project", "joinable", "--user", "user-3"]);

    // user-3 belongs to nothing, so all three projects are joinable.
    assert_eq!(value["data"]["total"].as_u64(), Some(3));
}

#[test]
fn assignable_follows_privacy() {
    let store = TestStore::with_demo();

    // Restricted project: member union only.
    let value = store.json(&["project", "assignable", "proj-1"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(2));

    // Public project: everyone.
    let value = store.json(&["project", "assignable", "proj-3"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(3));

    // Mixed restricted projects: union of members.
    let value = store.json(&["project", "assignable", "proj-1", "proj-2"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(2));
}
