//! In-memory customer directory

use super::lookup::CustomerLookup;
use dashmap::DashMap;
use shared::models::Customer;

#[derive(Debug, Default)]
pub struct CustomerDirectory {
    customers: DashMap<String, Customer>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let directory = Self::new();
        for customer in customers {
            directory.upsert(customer);
        }
        directory
    }

    pub fn upsert(&self, customer: Customer) {
        self.customers.insert(customer.id.clone(), customer);
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl CustomerLookup for CustomerDirectory {
    fn by_id(&self, id: &str) -> Option<Customer> {
        self.customers.get(id).map(|c| c.value().clone())
    }
}
