use std::sync::{Mutex, MutexGuard};

/// Reply for every successful `add`.
pub const PRODUCT_ADDED: &str = "Product added Successfully";

/// Reply for `delete`, whether or not anything was removed.
pub fn deleted_message(product: &str) -> String {
    format!("product {product} deleted")
}

/// Process-wide product list.
///
/// All operations serialize on one mutex, so concurrent add/delete never
/// interleave inside a single call. Duplicates are allowed.
#[derive(Debug, Default)]
pub struct ProductCatalog {
    items: Mutex<Vec<String>>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unconditionally (no validation, no size bound).
    pub fn add(&self, product: impl Into<String>) -> &'static str {
        let product = product.into();
        tracing::info!(product = %product, "product added");
        self.lock().push(product);
        PRODUCT_ADDED
    }

    /// Snapshot of the list in insertion order.
    pub fn list(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Remove the first entry equal to `product`.
    ///
    /// The reply is the same whether or not a match existed; use
    /// [`ProductCatalog::remove_first`] to find out.
    pub fn delete(&self, product: &str) -> String {
        let removed = self.remove_first(product);
        tracing::info!(product = %product, removed, "product delete requested");
        deleted_message(product)
    }

    /// Remove the first entry equal to `product`; true when one was removed.
    pub fn remove_first(&self, product: &str) -> bool {
        let mut items = self.lock();
        match items.iter().position(|p| p == product) {
            Some(idx) => {
                items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the Vec half-updated, so a
    // poisoned guard is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
