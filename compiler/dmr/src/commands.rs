//! Command handlers for the `dmr` CLI.
//!
//! Handlers print their result to stdout. Failures are reported on stderr
//! and exit with status 1.

use crate::config::DmrConfig;
use dm_runtime::{
    DreamObject, DreamPath, DreamProcArguments, FileResourceLoader, ListMetaObject, LoadError,
    ObjectTree, RuntimeError, RuntimeResult,
};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Load the compiled world named by `config` and attach built-in hooks.
pub fn load_world(config: &DmrConfig) -> Result<ObjectTree, CommandError> {
    let text = std::fs::read_to_string(&config.compiled).map_err(|source| CommandError::Read {
        path: config.compiled.clone(),
        source,
    })?;
    let resources = FileResourceLoader::new(&config.resources);

    let mut tree = ObjectTree::new();
    tree.load_from_str(&text, &resources)?;
    attach_builtins(&tree)?;
    tracing::debug!(
        entries = tree.len(),
        resources = resources.cached_count(),
        "world loaded"
    );
    Ok(tree)
}

/// Attach the hooks of built-in types present in `tree`.
pub fn attach_builtins(tree: &ObjectTree) -> RuntimeResult<()> {
    let list = DreamPath::list();
    if tree.has_entry(&list) {
        tree.set_meta_object(&list, Arc::new(ListMetaObject))?;
    }
    Ok(())
}

/// One line per entry, sorted by path. Entries with an explicit parent show
/// it after a colon; locally defined procs follow in brackets.
pub fn render_tree(tree: &ObjectTree) -> String {
    let mut lines: Vec<String> = tree
        .entries()
        .map(|(_, entry)| {
            let mut line = entry.path().to_string();
            let explicit_parent = entry
                .has_explicit_parent()
                .then(|| entry.parent().and_then(|parent| tree.entry(parent)))
                .flatten();
            if let Some(parent) = explicit_parent {
                line.push_str(&format!(" : {}", parent.path()));
            }
            let mut procs: Vec<&str> = entry.definition().local_proc_names().collect();
            if !procs.is_empty() {
                procs.sort_unstable();
                line.push_str(&format!(" [{}]", procs.join(", ")));
            }
            line
        })
        .collect();
    lines.sort();
    lines.join("\n")
}

/// The object's type, then each variable as `name = value`. Lists also show
/// their contents.
pub fn render_object(object: &DreamObject) -> RuntimeResult<String> {
    let mut lines = vec![object.ty().to_string()];
    for name in object.variable_names() {
        let value = object.get_variable(&name)?;
        lines.push(format!("  {name} = {value}"));
    }
    if object.is_list() {
        let values = object.with_list(|list| {
            list.values()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
        })?;
        lines.push(format!("  contents = [{}]", values.join(", ")));
    }
    Ok(lines.join("\n"))
}

pub fn print_tree(config: &DmrConfig) {
    match load_world(config) {
        Ok(tree) => println!("{}", render_tree(&tree)),
        Err(error) => fail(&error),
    }
}

pub fn new_object(config: &DmrConfig) {
    let Some(path) = config.arguments.first() else {
        eprintln!("error: missing type path");
        eprintln!("Usage: dmr new <compiled.json> <path> [--resources <dir>]");
        std::process::exit(1);
    };

    let created = load_world(config).and_then(|tree| {
        let object = tree.create_object(&DreamPath::new(path), &DreamProcArguments::empty())?;
        Ok(render_object(&object)?)
    });
    match created {
        Ok(rendered) => println!("{rendered}"),
        Err(error) => fail(&error),
    }
}

fn fail(error: &CommandError) -> ! {
    eprintln!("error: {error}");
    std::process::exit(1);
}
