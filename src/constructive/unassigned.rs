//! Set of customers still waiting for a tour.

/// Unassigned customers with O(1) removal by swap-remove.
///
/// Iteration order is unspecified once elements have been removed; callers
/// that need deterministic choices break ties on the customer index.
#[derive(Debug, Clone)]
pub(crate) struct UnassignedSet {
    members: Vec<usize>,
}

impl UnassignedSet {
    /// All non-depot customers of an instance with `customer_count` locations.
    pub(crate) fn all_customers(customer_count: usize) -> Self {
        Self {
            members: (1..customer_count).collect(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.members.len()
    }

    /// `(slot, customer)` pairs; the slot is what [`Self::take`] expects.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.members.iter().copied().enumerate()
    }

    /// Removes and returns the customer stored at `slot`.
    pub(crate) fn take(&mut self, slot: usize) -> usize {
        self.members.swap_remove(slot)
    }
}
