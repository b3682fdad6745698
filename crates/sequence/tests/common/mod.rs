#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]

use anyhow::{Error, anyhow};
use html::{DOM, NodeId};

pub fn init_logger() {
    let _log_init: Result<(), _> = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// The element whose `id` attribute is `id`.
pub fn by_id(dom: &DOM, id: &str) -> Result<NodeId, Error> {
    dom.find_by_attribute("id", id)
        .ok_or_else(|| anyhow!("no element with id {id:?}"))
}

/// The element whose `sq-id` attribute is `identity`.
pub fn tagged(dom: &DOM, identity: &str) -> Result<NodeId, Error> {
    dom.find_by_attribute("sq-id", identity)
        .ok_or_else(|| anyhow!("no element tagged {identity:?}"))
}

/// The `id` of the parent of the element tagged `identity`.
pub fn parent_id(dom: &DOM, identity: &str) -> Result<Option<String>, Error> {
    let node = tagged(dom, identity)?;
    Ok(dom
        .parent(node)
        .and_then(|parent| dom.get_attribute(parent, "id"))
        .map(str::to_owned))
}

/// Labels of the element children of `container`: their `sq-id`, else `id`,
/// else tag name.
pub fn child_labels(dom: &DOM, container: NodeId) -> Vec<String> {
    dom.children(container)
        .into_iter()
        .filter(|child| dom.is_element(*child))
        .map(|child| {
            dom.get_attribute(child, "sq-id")
                .or_else(|| dom.get_attribute(child, "id"))
                .or_else(|| dom.tag_name(child))
                .unwrap_or_default()
                .to_owned()
        })
        .collect()
}
