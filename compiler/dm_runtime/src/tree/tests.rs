use super::*;
use crate::meta_object::ListMetaObject;
use crate::proc::DreamProc;
use crate::test_helpers::{load_tree, sample_document, sample_tree, MockResourceLoader};
use crate::value::DreamValue;
use pretty_assertions::assert_eq;
use serde_json::json;

fn paths(tree: &ObjectTree, ids: &[TreeEntryId]) -> Vec<String> {
    let mut paths: Vec<String> = ids
        .iter()
        .map(|id| tree.entry(*id).unwrap().path().to_string())
        .collect();
    paths.sort();
    paths
}

fn id(tree: &ObjectTree, path: &str) -> TreeEntryId {
    tree.entry_id(&DreamPath::new(path)).unwrap()
}

#[test]
fn test_new_tree_has_only_root() {
    let tree = ObjectTree::new();
    assert_eq!(tree.len(), 1);
    assert!(!tree.is_empty());
    assert!(tree.has_entry(&DreamPath::root()));
    assert_eq!(tree.root().path(), &DreamPath::root());
    assert_eq!(tree.root().parent(), None);
}

#[test]
fn test_resolution() {
    let tree = sample_tree();
    assert_eq!(tree.len(), 8);
    for path in [
        "/datum",
        "/atom",
        "/atom/movable",
        "/obj",
        "/obj/item",
        "/mob",
        "/list",
    ] {
        assert!(tree.has_entry(&DreamPath::new(path)), "{path}");
    }
    assert!(!tree.has_entry(&DreamPath::new("/turf")));
    assert!(!tree.has_entry(&DreamPath::new("/atom/movable/obj")));

    assert_eq!(
        tree.get_tree_entry(&DreamPath::new("/obj/item")).unwrap().path(),
        &DreamPath::new("/obj/item")
    );
    assert_eq!(
        tree.entry_id(&DreamPath::new("/turf")),
        Err(RuntimeError::ObjectDoesNotExist {
            path: DreamPath::new("/turf")
        })
    );
}

#[test]
fn test_relative_paths_are_rejected() {
    let tree = sample_tree();
    assert!(!tree.has_entry(&DreamPath::new("obj")));
    assert_eq!(
        tree.get_object_definition(&DreamPath::new("obj"))
            .map(|definition| definition.ty().clone()),
        Err(RuntimeError::PathNotAbsolute {
            path: DreamPath::new("obj")
        })
    );
}

#[test]
fn test_declared_parents() {
    let tree = sample_tree();
    let movable = id(&tree, "/atom/movable");

    let obj = tree.entry(id(&tree, "/obj")).unwrap();
    assert_eq!(obj.parent(), Some(movable));
    assert!(obj.has_explicit_parent());

    let item = tree.entry(id(&tree, "/obj/item")).unwrap();
    assert_eq!(item.parent(), Some(id(&tree, "/obj")));
    assert!(!item.has_explicit_parent());

    assert_eq!(
        paths(&tree, &tree.derived_children(movable)),
        vec!["/mob", "/obj"]
    );
    assert_eq!(
        paths(&tree, &tree.derived_children(TreeEntryId::ROOT)),
        vec!["/atom", "/datum", "/list"]
    );
}

#[test]
fn test_branch_breaking_children() {
    let tree = sample_tree();
    let movable = tree.entry(id(&tree, "/atom/movable")).unwrap();

    let mut names: Vec<&String> = movable.branch_breaking_children().keys().collect();
    names.sort();
    assert_eq!(names, vec!["mob", "obj"]);
    assert!(movable.children().is_empty());

    // Still reachable by path under the root.
    assert!(tree.root().children().contains_key("obj"));
}

#[test]
fn test_descendants() {
    let tree = sample_tree();
    let atom = id(&tree, "/atom");

    assert_eq!(
        paths(&tree, &tree.descendants(atom, false, false)),
        vec!["/atom/movable"]
    );
    assert_eq!(
        paths(&tree, &tree.descendants(atom, true, true)),
        vec!["/atom", "/atom/movable", "/mob", "/obj", "/obj/item"]
    );
}

#[test]
fn test_inheritance_through_declared_parent() {
    let tree = sample_tree();
    let obj = tree.get_object_definition(&DreamPath::new("/obj")).unwrap();
    assert!(obj.is_subtype_of(&DreamPath::new("/atom")));
    assert_eq!(obj.variable_default("speed"), Some(&DreamValue::Integer(1)));
    assert_eq!(obj.variable_default("name"), Some(&DreamValue::from("obj")));
    assert_eq!(obj.proc("Move").unwrap().bytecode(), &[2]);

    let item = tree.get_object_definition(&DreamPath::new("/obj/item")).unwrap();
    let moved = item.proc("Move").unwrap();
    let chain: Vec<&[u8]> = moved.super_chain().map(DreamProc::bytecode).collect();
    assert_eq!(chain, vec![&[3_u8][..], &[2_u8][..]]);
}

#[test]
fn test_global_cell_shared_down_the_tree() {
    let tree = sample_tree();
    let atom = tree.get_object_definition(&DreamPath::new("/atom")).unwrap();
    let mob = tree.get_object_definition(&DreamPath::new("/mob")).unwrap();

    atom.global_variable("count").unwrap().set(DreamValue::Integer(3));
    assert_eq!(
        mob.global_variable("count").map(|global| global.get()),
        Some(DreamValue::Integer(3))
    );
}

#[test]
fn test_set_meta_object_reaches_declared_children() {
    let tree = sample_tree();
    let count = tree
        .set_meta_object(&DreamPath::new("/atom/movable"), Arc::new(ListMetaObject))
        .unwrap();
    assert_eq!(count, 4);

    for path in ["/atom/movable", "/obj", "/obj/item", "/mob"] {
        let definition = tree.get_object_definition(&DreamPath::new(path)).unwrap();
        assert!(definition.meta_object().is_some(), "{path}");
    }
    for path in ["/", "/atom", "/datum", "/list"] {
        let definition = tree.get_object_definition(&DreamPath::new(path)).unwrap();
        assert!(definition.meta_object().is_none(), "{path}");
    }
    assert!(tree
        .set_meta_object(&DreamPath::new("/turf"), Arc::new(ListMetaObject))
        .is_err());
}

#[test]
fn test_create_object() {
    let tree = sample_tree();
    let list = tree
        .create_object(&DreamPath::list(), &DreamProcArguments::empty())
        .unwrap();
    assert!(list.is_list());

    let mob = tree
        .create_object(&DreamPath::new("/mob"), &DreamProcArguments::empty())
        .unwrap();
    assert!(!mob.is_list());
    assert_eq!(mob.get_variable("name"), Ok(DreamValue::from("atom")));

    assert!(tree
        .create_object(&DreamPath::new("/turf"), &DreamProcArguments::empty())
        .is_err());
}

#[test]
fn test_create_list_without_declared_entry() {
    let tree = ObjectTree::new();
    let list = tree
        .create_object(&DreamPath::list(), &DreamProcArguments::empty())
        .unwrap();
    assert!(list.is_list());
    assert_eq!(list.ty(), &DreamPath::list());

    list.with_list_mut(|list| list.add_value(DreamValue::Integer(4)))
        .unwrap();
    assert_eq!(list.get_variable("len"), Ok(DreamValue::Integer(1)));

    assert!(matches!(
        tree.create_object(&DreamPath::new("/list/stack"), &DreamProcArguments::empty()),
        Err(RuntimeError::ObjectDoesNotExist { .. })
    ));
}

#[test]
fn test_reload_replaces_tree() {
    let mut tree = sample_tree();
    let stale = id(&tree, "/obj/item");
    tree.load_from_str(
        &json!({ "name": "", "children": [{ "name": "turf" }] }).to_string(),
        &MockResourceLoader::default(),
    )
    .unwrap();

    assert_eq!(tree.len(), 2);
    assert!(tree.has_entry(&DreamPath::new("/turf")));
    assert!(!tree.has_entry(&DreamPath::new("/obj")));

    assert!(tree.entry(stale).is_none());
    assert!(tree.derived_children(stale).is_empty());
    assert!(tree.descendants(stale, true, true).is_empty());
}

#[test]
fn test_failed_load_keeps_tree() {
    let mut tree = sample_tree();
    let result = tree.load_from_str(
        &json!({ "name": "", "children": [{ "name": "ghost", "parent": "/mob" }] }).to_string(),
        &MockResourceLoader::default(),
    );

    assert!(matches!(
        result,
        Err(LoadError::Resolution(RuntimeError::ObjectDoesNotExist { .. }))
    ));
    assert_eq!(tree.len(), 8);
    assert!(tree.has_entry(&DreamPath::new("/obj/item")));
}

#[test]
fn test_invalid_root_name() {
    let mut tree = ObjectTree::new();
    let result = tree.load(&DreamObjectJson::named("world"), &MockResourceLoader::default());
    assert!(matches!(
        result,
        Err(LoadError::InvalidRootName { name }) if name == "world"
    ));
}

#[test]
fn test_duplicate_entries() {
    let mut tree = ObjectTree::new();
    let result = tree.load_from_str(
        &json!({ "name": "", "children": [{ "name": "mob" }, { "name": "mob" }] }).to_string(),
        &MockResourceLoader::default(),
    );
    assert!(matches!(
        result,
        Err(LoadError::DuplicateEntry { path }) if path == DreamPath::new("/mob")
    ));
}

#[test]
fn test_parent_declared_earlier_in_nesting() {
    let tree = load_tree(&json!({
        "name": "",
        "children": [{
            "name": "mob",
            "variables": { "health": 10 },
            "children": [
                { "name": "player" },
                { "name": "ghost", "parent": "/mob/player", "variables": { "health": 0 } }
            ]
        }]
    }));

    let ghost = tree.get_object_definition(&DreamPath::new("/mob/ghost")).unwrap();
    assert!(ghost.is_subtype_of(&DreamPath::new("/mob/player")));
    assert_eq!(ghost.variable_default("health"), Some(&DreamValue::Integer(0)));
    assert_eq!(
        paths(&tree, &tree.derived_children(id(&tree, "/mob"))),
        vec!["/mob/player"]
    );
}

#[test]
fn test_root_members() {
    let mut document = sample_document();
    document["variables"] = json!({ "world": "space" });
    let tree = load_tree(&document);
    let item = tree.get_object_definition(&DreamPath::new("/obj/item")).unwrap();
    assert_eq!(item.variable_default("world"), Some(&DreamValue::from("space")));
}
