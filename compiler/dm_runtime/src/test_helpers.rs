//! Test helpers: an in-memory resource loader and a small sample world.

#![allow(clippy::unwrap_used)]

use crate::{DreamResource, ObjectTree, ResourceError, ResourceLoader};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

/// Resource loader that records requests and never touches the filesystem.
#[derive(Default)]
pub struct MockResourceLoader {
    pub requested: Mutex<Vec<String>>,
}

impl ResourceLoader for MockResourceLoader {
    fn load_resource(&self, resource_path: &str) -> Result<Arc<DreamResource>, ResourceError> {
        self.requested.lock().push(resource_path.to_string());
        Ok(Arc::new(DreamResource::new(
            resource_path,
            format!("mock/{resource_path}"),
        )))
    }
}

pub fn load_tree(document: &serde_json::Value) -> ObjectTree {
    let mut tree = ObjectTree::new();
    tree.load_from_str(&document.to_string(), &MockResourceLoader::default())
        .unwrap();
    tree
}

/// `/obj` and `/mob` are declared under the root but inherit from
/// `/atom/movable`, as in a standard DM world.
pub fn sample_document() -> serde_json::Value {
    json!({
        "name": "",
        "children": [
            {
                "name": "datum",
                "variables": { "tag": "datum" }
            },
            {
                "name": "atom",
                "variables": { "name": "atom", "density": 0 },
                "globalVariables": { "count": 0 },
                "procs": { "Click": [{ "bytecode": [1] }] },
                "children": [
                    {
                        "name": "movable",
                        "variables": { "speed": 1 },
                        "procs": {
                            "Move": [{ "bytecode": [2], "arguments": [{ "name": "dir", "type": 32 }] }]
                        }
                    }
                ]
            },
            {
                "name": "obj",
                "parent": "/atom/movable",
                "variables": { "name": "obj" },
                "children": [
                    {
                        "name": "item",
                        "variables": { "weight": 5 },
                        "procs": { "Move": [{ "bytecode": [3] }] }
                    }
                ]
            },
            {
                "name": "mob",
                "parent": "/atom/movable"
            },
            {
                "name": "list"
            }
        ]
    })
}

pub fn sample_tree() -> ObjectTree {
    load_tree(&sample_document())
}
