// ============================================================================
// Storage Boundary
// ============================================================================
//
// Repository capabilities the business operations rely on. Lookups return
// owned snapshots; writes go through `add` (id assigned by the store) and
// `update` (whole-entity replace keyed by id). Uniqueness rules use the
// guarded `add_unless` / `update_unless` so the check and the write are one
// step.
//
// ============================================================================

mod memory;
mod seed;

pub use memory::{
    InMemoryLineItemRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemoryUserRepository, MemoryTable,
};
pub use seed::seed_demo_data;

use std::sync::Arc;

use crate::domain::order::{LineItem, Order};
use crate::domain::product::Product;
use crate::domain::user::User;
use crate::domain::{LineItemId, OrderId, ProductId, UserId};

/// A stored record with a store-assigned identity.
pub trait Entity: Clone + Send + Sync {
    type Id: Copy + Ord + From<u64> + Send + Sync;

    fn id(&self) -> Self::Id;
    fn assign_id(&mut self, id: Self::Id);
}

pub trait Repository<T: Entity>: Send + Sync {
    fn get_by_id(&self, id: T::Id) -> Option<T>;
    fn get_all(&self) -> Vec<T>;
    /// Insert with a freshly assigned id; returns the stored record.
    fn add(&self, item: T) -> T;
    /// Replace the record with the same id. False if it does not exist.
    fn update(&self, item: T) -> bool;
    fn remove_by_id(&self, id: T::Id) -> Option<T>;

    /// Insert unless a stored record matches `conflicts`. The check and the
    /// insert happen under one write lock. `None` on conflict.
    fn add_unless(&self, item: T, conflicts: &dyn Fn(&T) -> bool) -> Option<T>;

    /// Replace the record with the same id unless some *other* stored record
    /// matches `conflicts`. Atomic like `add_unless`.
    fn update_unless(&self, item: T, conflicts: &dyn Fn(&T) -> bool) -> Update;
}

/// Result of a guarded replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    Applied,
    Missing,
    Conflict,
}

pub trait UserRepository: Repository<User> {
    fn get_by_login(&self, login: &str) -> Option<User>;
    /// Registered users only; admins are excluded.
    fn get_all_registered(&self) -> Vec<User>;
}

pub trait ProductRepository: Repository<Product> {
    fn get_by_name(&self, name: &str) -> Option<Product>;
}

pub trait OrderRepository: Repository<Order> {
    fn get_by_customer_id(&self, customer_id: UserId) -> Vec<Order>;
}

pub trait LineItemRepository: Repository<LineItem> {}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }

    /// Personal information shares the owning user's id.
    fn assign_id(&mut self, id: UserId) {
        self.id = id;
        self.personal_information.id = id.0;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }

    fn assign_id(&mut self, id: ProductId) {
        self.id = id;
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }

    fn assign_id(&mut self, id: OrderId) {
        self.id = id;
    }
}

impl Entity for LineItem {
    type Id = LineItemId;

    fn id(&self) -> LineItemId {
        self.id
    }

    fn assign_id(&mut self, id: LineItemId) {
        self.id = id;
    }
}

/// Handles to every repository, shared by all operation providers.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub line_items: Arc<dyn LineItemRepository>,
}

impl Stores {
    /// Empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::default()),
            products: Arc::new(InMemoryProductRepository::default()),
            orders: Arc::new(InMemoryOrderRepository::default()),
            line_items: Arc::new(InMemoryLineItemRepository::default()),
        }
    }

    /// In-memory stores preloaded with the demo catalog and accounts.
    pub fn seeded() -> Self {
        let stores = Self::in_memory();
        seed_demo_data(&stores);
        stores
    }
}
