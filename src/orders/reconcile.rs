//! Merging a completed add-on order back into its parent.
//!
//! An add-on ("(Thêm)") order runs through the kitchen on its own. When it is completed,
//! its lines are folded into the parent and the add-on disappears. The parent write is a
//! conditional swap on the parent's current lines, and merges into the same parent are
//! serialised inside this process, so two add-ons completed together cannot overwrite each
//! other's lines.
//!
//! The add-on is deleted strictly after the parent write succeeded. If the parent is gone,
//! the add-on is kept as a plain completed order; if the parent write fails, the add-on is
//! left exactly as it was. The add-on is re-read under the merge lock, so completing the
//! same add-on twice merges its lines once.

use crate::model::{MenuItemId, Order, OrderItem, OrderKey, OrderPatch, OrderStatus};
use crate::order_actor::OrderError;
use crate::store::OrderStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// How many times a merge re-reads the parent after losing a race on its lines.
pub const MERGE_ATTEMPTS: usize = 3;

/// Folds `addition` into `base`.
///
/// Lines match on `(menu item id, note)`. A matching line gains the added quantity; an
/// unmatched line is appended. `base` keeps its order, new lines follow in the order given.
pub fn merge_lines(base: &[OrderItem], addition: &[OrderItem]) -> Vec<OrderItem> {
    let mut merged = base.to_vec();
    let mut index: HashMap<(MenuItemId, String), usize> = merged
        .iter()
        .enumerate()
        .map(|(pos, line)| ((line.item.id, line.note.clone()), pos))
        .collect();

    for line in addition {
        let key = (line.item.id, line.note.clone());
        match index.get(&key) {
            Some(&pos) => merged[pos].quantity += line.quantity,
            None => {
                index.insert(key, merged.len());
                merged.push(line.clone());
            }
        }
    }
    merged
}

type MergeLock = Arc<tokio::sync::Mutex<()>>;

/// Runs merges of add-on orders into their parents.
pub struct Reconciler<S> {
    store: Arc<S>,
    locks: Mutex<HashMap<OrderKey, MergeLock>>,
}

impl<S: OrderStore> Reconciler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Merges `child` into its parent and deletes it. Returns the updated parent.
    ///
    /// # Errors
    /// - `Validation` if `child` has no parent reference.
    /// - `NotFound` if the child is gone or no longer active, which is the case once it has
    ///   been merged. The parent is left alone.
    /// - `NotFound` if the parent no longer exists; the child is then marked completed and kept.
    /// - `Conflict` if the parent kept changing for [`MERGE_ATTEMPTS`] reads.
    /// - `Store` if a write failed. The child has not been deleted unless the parent write
    ///   succeeded.
    #[instrument(skip(self, child), fields(child = %child.key))]
    pub async fn reconcile(&self, child: &Order) -> Result<Order, OrderError> {
        let Some(parent_key) = child.parent_order_key else {
            return Err(OrderError::validation(format!(
                "{} is not an add-on order",
                child.key
            )));
        };

        let lock = self.lock_for(parent_key);
        let result = {
            let _guard = lock.lock().await;
            self.merge_into(child, parent_key).await
        };
        drop(lock);
        self.release(parent_key);
        result
    }

    async fn merge_into(&self, child: &Order, parent_key: OrderKey) -> Result<Order, OrderError> {
        let mut attempt = 1;
        loop {
            // The caller's snapshot may already have been merged by another completion.
            let child = match self.store.fetch_order(child.key).await? {
                Some(current) if current.is_active() => current,
                _ => {
                    debug!(child = %child.key, "Add-on already merged or closed");
                    return Err(OrderError::NotFound(child.key.to_string()));
                }
            };

            let Some(parent) = self.store.fetch_order(parent_key).await? else {
                warn!(%parent_key, "Parent order is gone, keeping add-on as a completed order");
                if let Err(e) = self
                    .store
                    .update_order(child.key, OrderPatch::status(OrderStatus::Completed))
                    .await
                {
                    warn!(error = %e, "Could not complete orphaned add-on");
                }
                return Err(OrderError::NotFound(parent_key.to_string()));
            };

            let merged = merge_lines(&parent.items, &child.items);
            match self
                .store
                .compare_and_swap_items(parent_key, parent.items, merged)
                .await
            {
                Ok(updated) => {
                    if let Err(e) = self.store.delete_order(child.key).await {
                        // The lines are already in the parent; completing the add-on again
                        // would count them twice.
                        warn!(%parent_key, error = %e, "Merged but could not delete add-on");
                        return Err(e);
                    }
                    info!(%parent_key, total = updated.total, "Add-on merged");
                    return Ok(updated);
                }
                Err(OrderError::Conflict(_)) if attempt < MERGE_ATTEMPTS => {
                    debug!(%parent_key, attempt, "Parent changed during merge, retrying");
                    attempt += 1;
                }
                Err(e) => {
                    warn!(%parent_key, error = %e, "Parent update failed, add-on kept");
                    return Err(e);
                }
            }
        }
    }

    fn lock_for(&self, key: OrderKey) -> MergeLock {
        let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(key).or_default().clone()
    }

    /// Drops the lock entry once no merge holds or waits on it.
    fn release(&self, key: OrderKey) {
        let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if locks.get(&key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(&key);
        }
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or(0)
    }
}
