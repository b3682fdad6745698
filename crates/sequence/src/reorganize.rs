//! The layout pass: move tagged elements under their containers, then sort
//! every container's children by order value.

use crate::attributes::{AttributeNames, PlacementRule, order_key};
use crate::breakpoints::Breakpoint;
use anyhow::Error;
use html::{DOM, NodeId};
use log::{debug, warn};

/// What a single pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Elements given a new parent.
    pub moved: usize,
    /// Elements whose destination was rejected because it lies inside them.
    pub skipped: usize,
    /// Containers whose children were sorted.
    pub containers: usize,
}

/// Runs reassignment followed by sorting for `active`.
///
/// # Errors
/// Only fails if the document rejects re-appending a container's own
/// children, which indicates a corrupted tree.
pub fn reorganize(
    dom: &mut DOM,
    names: &AttributeNames,
    active: Breakpoint,
) -> Result<PassSummary, Error> {
    let mut summary = reassign(dom, names, active);
    summary.containers = sort_containers(dom, names, active)?;
    Ok(summary)
}

/// Finds the container `identity` belongs under at `active`. Rules scoped to
/// `active` take priority over unscoped ones; within each group the first
/// container in document order wins.
fn find_destination(
    rules: &[(NodeId, PlacementRule)],
    identity: &str,
    active: Breakpoint,
) -> Option<NodeId> {
    rules
        .iter()
        .find(|(_, rule)| rule.accepts_at(active, identity))
        .or_else(|| rules.iter().find(|(_, rule)| rule.accepts_unscoped(identity)))
        .map(|(container, _)| *container)
}

/// Moves every tagged element under the container that accepts it.
///
/// Elements without a matching rule, or without a usable identity, stay
/// where they are. Elements whose destination lies inside them are retried
/// after the other moves, until a round moves nothing.
pub fn reassign(dom: &mut DOM, names: &AttributeNames, active: Breakpoint) -> PassSummary {
    let document: &DOM = dom;
    let rules: Vec<(NodeId, PlacementRule)> = document
        .descendants()
        .filter_map(|node| {
            PlacementRule::from_element(document, node, names).map(|rule| (node, rule))
        })
        .collect();
    let tagged: Vec<(NodeId, String)> = document
        .elements_with_attribute(names.id())
        .into_iter()
        .filter_map(|node| {
            let identity = document.get_attribute(node, names.id())?.trim();
            (!identity.is_empty()).then(|| (node, identity.to_owned()))
        })
        .collect();

    let mut summary = PassSummary::default();
    let mut pending = tagged;
    loop {
        let mut blocked = Vec::new();
        let mut moved = 0;
        for (node, identity) in pending {
            let Some(container) = find_destination(&rules, &identity, active) else {
                debug!("no container accepts {identity:?} at {active}");
                continue;
            };
            if !dom.has_attribute(container, names.container()) {
                dom.set_attribute(container, names.container(), "");
            }
            if dom.parent(node) == Some(container) {
                continue;
            }
            if dom.is_inclusive_ancestor(node, container) {
                blocked.push((node, identity));
                continue;
            }
            match dom.append_child(container, node) {
                Ok(()) => {
                    debug!("moved {identity:?} into container {container:?}");
                    moved += 1;
                }
                Err(err) => {
                    warn!("failed to move {identity:?}: {err}");
                    summary.skipped += 1;
                }
            }
        }
        summary.moved += moved;
        // A later move can carry a blocked element's destination out of it.
        if moved == 0 || blocked.is_empty() {
            for (_, identity) in &blocked {
                warn!("cannot move {identity:?} into a container nested inside it");
            }
            summary.skipped += blocked.len();
            break;
        }
        pending = blocked;
    }
    summary
}

/// Sorts the children of `container` by descending order value. Children
/// with equal values keep their relative order.
///
/// # Errors
/// See [`reorganize`].
pub fn sort_children(
    dom: &mut DOM,
    container: NodeId,
    names: &AttributeNames,
    active: Breakpoint,
) -> Result<(), Error> {
    let children = dom.children(container);
    for child in &children {
        dom.detach(*child);
    }
    let mut keyed: Vec<(i64, NodeId)> = children
        .into_iter()
        .map(|child| (order_key(dom, child, names, active), child))
        .collect();
    keyed.sort_by(|left, right| right.0.cmp(&left.0));
    for (_, child) in keyed {
        dom.append_child(container, child)?;
    }
    Ok(())
}

/// Sorts every marked container, in document order. Returns how many were
/// sorted.
///
/// # Errors
/// See [`reorganize`].
pub fn sort_containers(
    dom: &mut DOM,
    names: &AttributeNames,
    active: Breakpoint,
) -> Result<usize, Error> {
    let containers = dom.elements_with_attribute(names.container());
    for container in &containers {
        sort_children(dom, *container, names, active)?;
    }
    Ok(containers.len())
}
