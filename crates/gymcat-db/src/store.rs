//! The keyed product collection the sync step writes into.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use gymcat_core::Product;

use crate::DbError;

/// Find-one, insert-one and update-one over products keyed by flavour.
///
/// Writes are independent; no method spans more than one product.
pub trait ProductStore {
    fn find_by_flavour(
        &self,
        flavour: &str,
    ) -> impl Future<Output = Result<Option<Product>, DbError>> + Send;

    fn insert_product(&self, product: &Product) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Replaces every stored field of the product with the same flavour.
    fn update_product(&self, product: &Product) -> impl Future<Output = Result<(), DbError>> + Send;
}

/// In-process store that counts writes.
///
/// Backs the CLI's dry-run mode and the sync tests.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: Mutex<HashMap<String, Product>>,
    inserts: AtomicUsize,
    updates: AtomicUsize,
}

impl MemoryProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `products`; the seeding is not counted.
    #[must_use]
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products
            .into_iter()
            .map(|p| (p.flavour.clone(), p))
            .collect();
        Self {
            products: Mutex::new(map),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::Relaxed)
    }

    /// Total writes (inserts plus updates) since creation.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.inserts() + self.updates()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[must_use]
    pub fn get(&self, flavour: &str) -> Option<Product> {
        self.lock().get(flavour).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Product>> {
        // A poisoned map is still consistent: every write is a single insert.
        self.products
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ProductStore for MemoryProductStore {
    async fn find_by_flavour(&self, flavour: &str) -> Result<Option<Product>, DbError> {
        Ok(self.get(flavour))
    }

    async fn insert_product(&self, product: &Product) -> Result<(), DbError> {
        let mut products = self.lock();
        if products.contains_key(&product.flavour) {
            return Err(DbError::InvalidRow(format!(
                "flavour \"{}\" already exists",
                product.flavour
            )));
        }
        products.insert(product.flavour.clone(), product.clone());
        self.inserts.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<(), DbError> {
        let mut products = self.lock();
        let Some(stored) = products.get_mut(&product.flavour) else {
            return Err(DbError::InvalidRow(format!(
                "flavour \"{}\" does not exist",
                product.flavour
            )));
        };
        *stored = product.clone();
        self.updates.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
