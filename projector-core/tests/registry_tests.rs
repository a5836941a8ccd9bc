//! Registry listing behaviour against realistic workspace files on disk.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use projector_core::{registry, Config, Folder, Project, ProjectName, WorkspaceDescription};
use rstest::rstest;
use serde_json::{json, Value};

fn parse(value: Value) -> WorkspaceDescription {
    serde_json::from_value(value).expect("workspace description")
}

// ---------------------------------------------------------------------------
// 1. Registry vs legacy fallback
// ---------------------------------------------------------------------------

#[rstest]
#[case::no_registry_key(json!({"folders": [], "settings": {}}))]
#[case::empty_registry(json!({"projectManager.projectList": {}}))]
#[case::registry_without_folder_arrays(json!({
    "projectManager.projectList": {"A": {"description": "x"}, "B": {"folders": null}}
}))]
#[case::registry_not_an_object(json!({"projectManager.projectList": [{"name": "A"}]}))]
fn legacy_list_returned_verbatim(#[case] doc: Value) {
    let legacy = vec![
        Project::new("Alpha", "demo"),
        Project::new("Beta", "").with_folders(vec![Folder::new("b", "/b")]),
    ];
    let listed = registry::list_projects(Some(&parse(doc)), &legacy);
    assert_eq!(listed, legacy);
}

#[test]
fn legacy_folder_resolution() {
    let doc = parse(json!({
        "projectManager.projectList": {
            "Foo": {"folders": [{"name": "x", "path": "/a"}, {"name": "y", "path": "/b"}]}
        }
    }));
    let listed = registry::list_projects(Some(&doc), &[Project::new("Ignored", "")]);
    assert_eq!(
        listed,
        vec![Project::new("Foo", "")
            .with_folders(vec![Folder::new("x", "/a"), Folder::new("y", "/b")])]
    );
}

#[test]
fn registry_description_is_carried_over() {
    let doc = parse(json!({
        "projectManager.projectList": {
            "Foo": {"description": "the foo stack", "folders": [{"name": "x", "path": "/a"}]}
        }
    }));
    let listed = registry::list_projects(Some(&doc), &[]);
    assert_eq!(listed[0].description, "the foo stack");
    assert_eq!(
        registry::find_project(&listed, "Foo").map(|p| &p.name),
        Some(&ProjectName::from("Foo"))
    );
    assert!(registry::find_project(&listed, "foo").is_none(), "names are case-sensitive");
}

// ---------------------------------------------------------------------------
// 2. Legacy list from the config file
// ---------------------------------------------------------------------------

#[test]
fn legacy_list_loaded_from_config_file() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let config_file = home.child(".projector").child("config.yaml");
    config_file
        .write_str(
            "projectManager.projectList:\n\
             \x20 - name: Alpha\n\
             \x20   description: demo\n\
             \x20   settings:\n\
             \x20     editor.tabSize: 2\n",
        )
        .expect("write config");
    config_file.assert(predicate::path::exists());

    let config = Config::load_at(home.path()).expect("load config");
    let listed = registry::list_projects(None, &config.project_list);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, ProjectName::from("Alpha"));
    assert_eq!(listed[0].settings.as_ref().expect("settings")["editor.tabSize"], 2);
}
