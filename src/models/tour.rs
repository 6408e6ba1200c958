//! Vehicle tour type.

use serde::Serialize;

/// An ordered sequence of customers served by one vehicle.
///
/// The depot is implicit at both ends and never stored. The tour caches the
/// summed demand of its customers.
///
/// # Examples
///
/// ```
/// use cvrp_search::models::Tour;
///
/// let tour = Tour::new();
/// assert!(tour.is_empty());
/// assert_eq!(tour.load(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tour {
    customers: Vec<usize>,
    load: u64,
}

impl Tour {
    /// Creates an empty tour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Customer indices in visiting order.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Number of customers visited (excluding depot).
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Summed demand of the visited customers.
    pub fn load(&self) -> u64 {
        self.load
    }

    /// Customer at `position`, if any.
    pub fn get(&self, position: usize) -> Option<usize> {
        self.customers.get(position).copied()
    }

    pub(crate) fn insert(&mut self, position: usize, customer: usize, demand: u32) {
        self.customers.insert(position, customer);
        self.load += u64::from(demand);
    }

    /// Puts `customer` at `position`, returning the customer it replaces.
    pub(crate) fn replace(
        &mut self,
        position: usize,
        customer: usize,
        demand: u32,
        replaced_demand: u32,
    ) -> usize {
        let previous = std::mem::replace(&mut self.customers[position], customer);
        self.load = self.load - u64::from(replaced_demand) + u64::from(demand);
        previous
    }

    pub(crate) fn swap_positions(&mut self, first: usize, second: usize) {
        self.customers.swap(first, second);
    }
}
