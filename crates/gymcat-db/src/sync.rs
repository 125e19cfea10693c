//! Upsert-by-compare of transformed products into a [`ProductStore`].

use gymcat_core::Product;
use serde::Serialize;

use crate::store::ProductStore;

/// A product the sync step could not write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncError {
    pub flavour: String,
    pub error: String,
}

/// What one sync pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub errors: Vec<SyncError>,
}

impl SyncReport {
    /// Inserts plus updates.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Writes `products` into `store`, one product at a time.
///
/// A product whose flavour is not stored yet is inserted. A stored product
/// is rewritten only when some field differs; otherwise it is left alone,
/// so a second pass over the same products performs no writes. Store errors
/// are recorded per product and never stop the batch.
pub async fn sync_products<S: ProductStore>(store: &S, products: &[Product]) -> SyncReport {
    let mut report = SyncReport::default();

    for product in products {
        let flavour = product.flavour.as_str();
        let outcome = match store.find_by_flavour(flavour).await {
            Ok(None) => store.insert_product(product).await.map(|()| {
                tracing::info!(flavour, "inserted product");
                report.inserted += 1;
            }),
            Ok(Some(existing)) if existing.content_matches(product) => {
                tracing::debug!(flavour, "product unchanged; skipping");
                report.unchanged += 1;
                Ok(())
            }
            Ok(Some(existing)) => store.update_product(product).await.map(|()| {
                let changed = existing.changed_fields(product).join(", ");
                tracing::info!(flavour, changed = %changed, "updated product");
                report.updated += 1;
            }),
            Err(e) => Err(e),
        };

        if let Err(e) = outcome {
            tracing::warn!(flavour, error = %e, "failed to store product");
            report.errors.push(SyncError {
                flavour: flavour.to_owned(),
                error: e.to_string(),
            });
        }
    }

    report
}
