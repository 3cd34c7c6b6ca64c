//! Reference set and unused-group filter

use crate::aws::{FunctionSummary, NetworkInterface, Reservation, SecurityGroup};
use std::collections::HashSet;

/// Name AWS gives the per-VPC group that can never be deleted
pub const DEFAULT_GROUP_NAME: &str = "default";

/// Security group ids referenced by something still alive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    ids: HashSet<String>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of the groups on every interface, instance and VPC function.
    ///
    /// Entries without groups contribute nothing.
    pub fn from_inventory(
        interfaces: &[NetworkInterface],
        reservations: &[Reservation],
        functions: &[FunctionSummary],
    ) -> Self {
        let mut refs = Self::new();

        for eni in interfaces {
            refs.extend(&eni.group_ids);
        }

        for instance in reservations.iter().flat_map(|r| &r.instances) {
            refs.extend(&instance.group_ids);
        }

        for ids in functions.iter().filter_map(|f| f.vpc_group_ids.as_ref()) {
            refs.extend(ids);
        }

        refs
    }

    pub fn insert(&mut self, group_id: impl Into<String>) {
        self.ids.insert(group_id.into());
    }

    pub fn extend<'a, I>(&mut self, group_ids: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        self.ids.extend(group_ids.into_iter().cloned());
    }

    pub fn contains(&self, group_id: &str) -> bool {
        self.ids.contains(group_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Groups that nothing references, excluding the default group, in inventory order.
pub fn find_unused_groups(groups: &[SecurityGroup], refs: &ReferenceSet) -> Vec<SecurityGroup> {
    groups
        .iter()
        .filter(|g| !refs.contains(&g.group_id) && g.group_name != DEFAULT_GROUP_NAME)
        .cloned()
        .collect()
}
