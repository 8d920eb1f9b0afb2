use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use super::{
    Entity, LineItemRepository, OrderRepository, ProductRepository, Repository, Update,
    UserRepository,
};
use crate::domain::order::{LineItem, Order};
use crate::domain::product::Product;
use crate::domain::user::{User, UserKind};
use crate::domain::UserId;

// ============================================================================
// In-Memory Repositories
// ============================================================================
//
// Each table serializes writers behind an RwLock, which gives the
// single-writer-per-entity guarantee the dispatch layer assumes.
//
// ============================================================================

pub struct MemoryTable<T: Entity> {
    rows: RwLock<BTreeMap<T::Id, T>>,
    next_id: AtomicU64,
}

impl<T: Entity> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<T: Entity> MemoryTable<T> {
    /// First row matching `predicate`, in id order.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        rows.values().find(|row| predicate(row)).cloned()
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        rows.values().filter(|row| predicate(row)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Entity> Repository<T> for MemoryTable<T> {
    fn get_by_id(&self, id: T::Id) -> Option<T> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        rows.get(&id).cloned()
    }

    fn get_all(&self) -> Vec<T> {
        self.filter(|_| true)
    }

    fn add(&self, mut item: T) -> T {
        let id = T::Id::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        item.assign_id(id);
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        rows.insert(id, item.clone());
        item
    }

    fn update(&self, item: T) -> bool {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        match rows.get_mut(&item.id()) {
            Some(row) => {
                *row = item;
                true
            }
            None => false,
        }
    }

    fn remove_by_id(&self, id: T::Id) -> Option<T> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        rows.remove(&id)
    }

    fn add_unless(&self, mut item: T, conflicts: &dyn Fn(&T) -> bool) -> Option<T> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        if rows.values().any(|row| conflicts(row)) {
            return None;
        }
        let id = T::Id::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        item.assign_id(id);
        rows.insert(id, item.clone());
        Some(item)
    }

    fn update_unless(&self, item: T, conflicts: &dyn Fn(&T) -> bool) -> Update {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let id = item.id();
        if !rows.contains_key(&id) {
            return Update::Missing;
        }
        if rows.values().any(|row| row.id() != id && conflicts(row)) {
            return Update::Conflict;
        }
        rows.insert(id, item);
        Update::Applied
    }
}

/// Forwards the generic repository surface to the wrapped table.
macro_rules! delegate_repository {
    ($repo:ident, $entity:ty) => {
        #[derive(Default)]
        pub struct $repo(MemoryTable<$entity>);

        impl $repo {
            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Repository<$entity> for $repo {
            fn get_by_id(&self, id: <$entity as Entity>::Id) -> Option<$entity> {
                self.0.get_by_id(id)
            }

            fn get_all(&self) -> Vec<$entity> {
                self.0.get_all()
            }

            fn add(&self, item: $entity) -> $entity {
                self.0.add(item)
            }

            fn update(&self, item: $entity) -> bool {
                self.0.update(item)
            }

            fn remove_by_id(&self, id: <$entity as Entity>::Id) -> Option<$entity> {
                self.0.remove_by_id(id)
            }

            fn add_unless(
                &self,
                item: $entity,
                conflicts: &dyn Fn(&$entity) -> bool,
            ) -> Option<$entity> {
                self.0.add_unless(item, conflicts)
            }

            fn update_unless(&self, item: $entity, conflicts: &dyn Fn(&$entity) -> bool) -> Update {
                self.0.update_unless(item, conflicts)
            }
        }
    };
}

delegate_repository!(InMemoryUserRepository, User);
delegate_repository!(InMemoryProductRepository, Product);
delegate_repository!(InMemoryOrderRepository, Order);
delegate_repository!(InMemoryLineItemRepository, LineItem);

impl UserRepository for InMemoryUserRepository {
    fn get_by_login(&self, login: &str) -> Option<User> {
        self.0.find(|user| user.login == login)
    }

    fn get_all_registered(&self) -> Vec<User> {
        self.0.filter(|user| user.kind == UserKind::RegisteredUser)
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn get_by_name(&self, name: &str) -> Option<Product> {
        self.0.find(|product| product.name == name)
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn get_by_customer_id(&self, customer_id: UserId) -> Vec<Order> {
        self.0.filter(|order| order.customer_id == customer_id)
    }
}

impl LineItemRepository for InMemoryLineItemRepository {}

// ============================================================================
// Unit Tests
// ============================================================================
