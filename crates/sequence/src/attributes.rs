//! The attribute surface: names derived from the prefix, and typed parsing
//! of placement rules and order values.

use crate::breakpoints::Breakpoint;
use crate::error::SequenceError;
use html::{DOM, NodeId};
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_PREFIX: &str = "sq";

/// Attribute names for one prefix, e.g. `sq-id`, `sq-for`, `sq-order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeNames {
    prefix: String,
    id: String,
    container: String,
    placement: String,
    order: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self::build(DEFAULT_PREFIX)
    }
}

impl AttributeNames {
    /// Derives the attribute names for `prefix`.
    ///
    /// The prefix is lowercased, since the HTML parser lowercases attribute
    /// names.
    ///
    /// # Errors
    /// Rejects an empty prefix or one containing whitespace.
    pub fn new(prefix: &str) -> Result<Self, SequenceError> {
        if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
            return Err(SequenceError::InvalidPrefix(prefix.to_owned()));
        }
        Ok(Self::build(&prefix.to_ascii_lowercase()))
    }

    fn build(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            id: format!("{prefix}-id"),
            container: format!("{prefix}-container"),
            placement: format!("{prefix}-for"),
            order: format!("{prefix}-order"),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Identity marker, `<prefix>-id`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Engine-managed container marker, `<prefix>-container`.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Unscoped placement rule, `<prefix>-for`.
    pub fn placement(&self) -> &str {
        &self.placement
    }

    pub fn scoped_placement(&self, breakpoint: Breakpoint) -> String {
        format!("{}-{breakpoint}", self.placement)
    }

    /// Unscoped order value, `<prefix>-order`.
    pub fn order(&self) -> &str {
        &self.order
    }

    pub fn scoped_order(&self, breakpoint: Breakpoint) -> String {
        format!("{}-{breakpoint}", self.order)
    }

    /// The breakpoint a `<prefix>-for-<bp>` attribute name is scoped to.
    fn placement_scope(&self, name: &str) -> Option<Breakpoint> {
        name.strip_prefix(self.placement.as_str())?
            .strip_prefix('-')?
            .parse()
            .ok()
    }
}

/// Splits a comma-separated identity list into a set, ignoring blank entries.
pub fn parse_identity_list(text: &str) -> HashSet<String> {
    text.split(',')
        .map(str::trim)
        .filter(|identity| !identity.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parses an order value; anything that is not an integer counts as 0.
pub fn parse_order(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}

/// The identities a prospective container accepts, per breakpoint and
/// unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementRule {
    scoped: BTreeMap<Breakpoint, HashSet<String>>,
    unscoped: Option<HashSet<String>>,
}

impl PlacementRule {
    /// Reads the placement attributes of `node`. Returns `None` when the node
    /// declares no rule at all.
    pub fn from_element(dom: &DOM, node: NodeId, names: &AttributeNames) -> Option<Self> {
        let data = dom.node(node)?;
        let mut rule = Self::default();
        for (name, value) in data.attrs.iter() {
            if name == names.placement() {
                rule.unscoped = Some(parse_identity_list(value));
            } else if let Some(breakpoint) = names.placement_scope(name) {
                rule.scoped
                    .entry(breakpoint)
                    .or_default()
                    .extend(parse_identity_list(value));
            }
        }
        (rule.unscoped.is_some() || !rule.scoped.is_empty()).then_some(rule)
    }

    /// Whether the rule scoped to `breakpoint` lists `identity`.
    pub fn accepts_at(&self, breakpoint: Breakpoint, identity: &str) -> bool {
        self.scoped
            .get(&breakpoint)
            .is_some_and(|identities| identities.contains(identity))
    }

    /// Whether the unscoped rule lists `identity`.
    pub fn accepts_unscoped(&self, identity: &str) -> bool {
        self.unscoped
            .as_ref()
            .is_some_and(|identities| identities.contains(identity))
    }
}

/// Sort key of a child: its order for `breakpoint`, else its unscoped
/// order, else 0. Non-element nodes are always 0.
pub fn order_key(dom: &DOM, node: NodeId, names: &AttributeNames, breakpoint: Breakpoint) -> i64 {
    if !dom.is_element(node) {
        return 0;
    }
    dom.get_attribute(node, &names.scoped_order(breakpoint))
        .or_else(|| dom.get_attribute(node, names.order()))
        .map_or(0, parse_order)
}
