//! Integration Tests: concurrent sessions staging CUG changes
//!
//! Each manager stages into its own session; the store rejects the later of two
//! conflicting commits instead of silently dropping one of the writes.

use assert_matches::assert_matches;
use cug_authorization::{CugAccessControlManager, ImportBehavior};
use cug_core::{CugError, PrincipalName};
use cug_testkit::*;
use cug_tree::{MemorySession, TreeView};

fn principal(name: &str) -> PrincipalName {
    PrincipalName::new(name).unwrap()
}

#[test]
fn concurrent_set_policy_conflicts_on_commit() {
    let fixture = CugFixture::new();
    let content = path(SUPPORTED_PATH);
    let mut first = fixture.new_manager();
    let mut second = fixture.new_manager();

    for (manager, name) in [(&mut first, "alice"), (&mut second, "bob")] {
        let mut policy = manager
            .get_applicable_policies(&content)
            .unwrap()
            .next()
            .unwrap();
        policy.as_cug_mut().unwrap().add_principals([principal(name)]);
        manager.set_policy(&content, &policy).unwrap();
    }

    first.view_mut().commit().unwrap();
    assert_matches!(second.view_mut().commit(), Err(CugError::Conflict { .. }));

    let reader = fixture.new_manager();
    let persisted = reader.get_policies(&content).unwrap().remove(0);
    let cug = persisted.as_cug().unwrap();
    assert!(cug.contains(&principal("alice")));
    assert!(!cug.contains(&principal("bob")));
}

#[test]
fn conflicting_session_recovers_after_refresh() {
    let fixture = CugFixture::new();
    let content = path(SUPPORTED_PATH);
    let mut first = fixture.new_manager();
    let mut second = fixture.new_manager();

    let policy = first
        .get_applicable_policies(&content)
        .unwrap()
        .next()
        .unwrap();
    first.set_policy(&content, &policy).unwrap();
    first.view_mut().commit().unwrap();

    // The second session still sees the pre-commit snapshot.
    let stale = second
        .get_applicable_policies(&content)
        .unwrap()
        .next()
        .unwrap();
    second.set_policy(&content, &stale).unwrap();
    assert_matches!(second.view_mut().commit(), Err(CugError::Conflict { .. }));

    second.view_mut().refresh();
    assert_eq!(second.get_applicable_policies(&content).unwrap().len(), 0);

    let mut persisted = second.get_policies(&content).unwrap().remove(0);
    persisted
        .as_cug_mut()
        .unwrap()
        .add_principals([principal("editors")]);
    second.set_policy(&content, &persisted).unwrap();
    second.view_mut().commit().unwrap();

    let reloaded = fixture.new_manager().get_policies(&content).unwrap();
    assert!(reloaded[0].as_cug().unwrap().contains(&principal("editors")));
}

#[test]
fn concurrent_remove_and_update_conflict() {
    let mut fixture = CugFixture::new();
    let content = path(SUPPORTED_PATH);
    let policy = fixture
        .manager
        .get_applicable_policies(&content)
        .unwrap()
        .next()
        .unwrap();
    fixture.manager.set_policy(&content, &policy).unwrap();
    fixture.commit();

    let mut remover = fixture.new_manager();
    let mut updater = fixture.new_manager();

    let persisted = remover.get_policies(&content).unwrap().remove(0);
    remover.remove_policy(&content, &persisted).unwrap();

    let mut persisted = updater.get_policies(&content).unwrap().remove(0);
    persisted
        .as_cug_mut()
        .unwrap()
        .add_principals([principal("bob")]);
    updater.set_policy(&content, &persisted).unwrap();

    remover.view_mut().commit().unwrap();
    assert_matches!(updater.view_mut().commit(), Err(CugError::Conflict { .. }));
    assert!(fixture.new_manager().get_policies(&content).unwrap().is_empty());
}

fn policy_on_new_child(fixture: &CugFixture) -> CugAccessControlManager<MemorySession> {
    let mut adder = fixture.new_manager();
    let content = adder.view().resolve(&path(SUPPORTED_PATH)).unwrap();
    let child = adder
        .view_mut()
        .add_child(&content, "x", "oak:Unstructured")
        .unwrap()
        .path()
        .clone();
    let mut policy = adder.get_applicable_policies(&child).unwrap().next().unwrap();
    policy
        .as_cug_mut()
        .unwrap()
        .add_principals([PrincipalName::everyone()]);
    adder.set_policy(&child, &policy).unwrap();
    adder
}

fn removal_of_content(fixture: &CugFixture) -> CugAccessControlManager<MemorySession> {
    let mut remover = fixture.new_manager();
    let root = remover.view().resolve(&path("/")).unwrap();
    assert!(remover.view_mut().remove_child(&root, "content").unwrap());
    remover
}

#[test]
fn removing_subtree_with_concurrent_policy_below_conflicts() {
    let fixture = CugFixture::new();
    let mut adder = policy_on_new_child(&fixture);
    let mut remover = removal_of_content(&fixture);

    adder.view_mut().commit().unwrap();
    assert_matches!(remover.view_mut().commit(), Err(CugError::Conflict { .. }));

    let reader = fixture.new_manager();
    assert!(reader.view().exists(&path(SUPPORTED_PATH)));
    let policies = reader.get_policies(&path("/content/x")).unwrap();
    assert_eq!(policies.len(), 1);
}

#[test]
fn policy_below_concurrently_removed_subtree_conflicts() {
    let fixture = CugFixture::new();
    let mut adder = policy_on_new_child(&fixture);
    let mut remover = removal_of_content(&fixture);

    remover.view_mut().commit().unwrap();
    assert_matches!(adder.view_mut().commit(), Err(CugError::Conflict { .. }));

    let reader = fixture.new_manager();
    assert!(!reader.view().exists(&path(SUPPORTED_PATH)));
    assert!(!reader.view().exists(&path("/content/x")));
}

#[test]
fn policies_on_disjoint_paths_commit_independently() {
    let fixture = CugFixture::new();
    let content = path(SUPPORTED_PATH);
    let subtree = path(SUPPORTED_SUBTREE_PATH);
    let mut first = fixture.new_manager();
    let mut second = fixture.new_manager();

    let policy = first.get_applicable_policies(&content).unwrap().next().unwrap();
    first.set_policy(&content, &policy).unwrap();
    let policy = second.get_applicable_policies(&subtree).unwrap().next().unwrap();
    second.set_policy(&subtree, &policy).unwrap();

    first.view_mut().commit().unwrap();
    second.view_mut().commit().unwrap();

    let reader = fixture.new_manager();
    assert_eq!(reader.get_policies(&content).unwrap().len(), 1);
    assert_eq!(reader.get_policies(&subtree).unwrap().len(), 1);
}

#[test]
fn ignored_principals_are_not_persisted() {
    let mut fixture = CugFixture::with_import_behavior(ImportBehavior::Ignore);
    let content = path(SUPPORTED_PATH);
    let mut policy = fixture
        .manager
        .get_applicable_policies(&content)
        .unwrap()
        .next()
        .unwrap();
    policy
        .as_cug_mut()
        .unwrap()
        .add_principals([principal("unknown"), principal("alice")]);
    fixture.manager.set_policy(&content, &policy).unwrap();
    fixture.commit();

    let reloaded = fixture.new_manager().get_policies(&content).unwrap().remove(0);
    let names: Vec<_> = reloaded
        .as_cug()
        .unwrap()
        .principal_names()
        .map(|p| p.as_str().to_string())
        .collect();
    assert_eq!(names, vec!["alice"]);
}
