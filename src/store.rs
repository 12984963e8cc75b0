// 🗄️ Receipt Store - in-memory identity map
//
// "The id is IDENTITY (never changes), the receipt is a VALUE (never mutated)"
//
// Insertion-only: no update, no delete, no persistence. Contents live exactly
// as long as the process that owns the store.

use crate::error::{ReceiptError, ReceiptResult};
use crate::receipt::Receipt;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// Shared, thread-safe map of receipt id → receipt.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct ReceiptStore {
    receipts: Arc<RwLock<HashMap<String, Arc<Receipt>>>>,
}

impl ReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a receipt under a fresh UUID v4 and return the id.
    ///
    /// Ids are never reused: a colliding draw is replaced before insert.
    pub fn create(&self, receipt: Receipt) -> String {
        let receipt = Arc::new(receipt);
        // Insertion-only map, so a poisoned lock still guards a consistent map
        let mut receipts = self.receipts.write().unwrap_or_else(PoisonError::into_inner);

        loop {
            let id = Uuid::new_v4().to_string();
            if let Entry::Vacant(slot) = receipts.entry(id.clone()) {
                slot.insert(receipt);
                return id;
            }
        }
    }

    /// Look up a receipt by id
    pub fn get(&self, id: &str) -> ReceiptResult<Arc<Receipt>> {
        let receipts = self.receipts.read().unwrap_or_else(PoisonError::into_inner);

        receipts
            .get(id)
            .cloned()
            .ok_or_else(|| ReceiptError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.receipts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// TESTS
// ============================================================================
