//! In-memory location store for testing and the demo binary

use std::collections::HashMap;
use crate::core::Fix;
use crate::store::{LocationStore, StoreEditor, StoreError, StoreResult};

/// Location store that keeps verified fixes in a map keyed by source id
#[derive(Debug)]
pub struct MemoryLocationStore {
    fixes: HashMap<String, Fix>,
    available: bool,
    fail_after_puts: Option<usize>,
    sessions_opened: usize,
    sessions_ended: usize,
    committed_batches: Vec<Vec<String>>,
}

impl MemoryLocationStore {
    /// Create an empty, available store
    pub fn new() -> Self {
        Self {
            fixes: HashMap::new(),
            available: true,
            fail_after_puts: None,
            sessions_opened: 0,
            sessions_ended: 0,
            committed_batches: Vec::new(),
        }
    }

    /// Simulate the store going offline (`edit` fails) or coming back
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Make every session reject puts after `count` successful ones
    pub fn fail_after_puts(&mut self, count: usize) {
        self.fail_after_puts = Some(count);
    }

    /// Stored state for a source, if any
    pub fn get(&self, source_id: &str) -> Option<&Fix> {
        self.fixes.get(source_id)
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened
    }

    pub fn sessions_ended(&self) -> usize {
        self.sessions_ended
    }

    /// Source ids written by each committed session, oldest first
    pub fn committed_batches(&self) -> &[Vec<String>] {
        &self.committed_batches
    }
}

impl Default for MemoryLocationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationStore for MemoryLocationStore {
    fn edit(&mut self) -> StoreResult<Box<dyn StoreEditor + '_>> {
        if !self.available {
            return Err(StoreError::Unavailable {
                reason: "memory store is offline".to_string(),
            });
        }
        self.sessions_opened += 1;
        Ok(Box::new(MemoryEditor {
            store: self,
            pending: Vec::new(),
        }))
    }
}

struct MemoryEditor<'a> {
    store: &'a mut MemoryLocationStore,
    pending: Vec<Fix>,
}

impl StoreEditor for MemoryEditor<'_> {
    fn put(&mut self, fix: &Fix) -> StoreResult<()> {
        if let Some(limit) = self.store.fail_after_puts {
            if self.pending.len() >= limit {
                return Err(StoreError::Rejected {
                    source_id: fix.source_id.clone(),
                    reason: format!("write limit of {} reached", limit),
                });
            }
        }
        self.pending.push(fix.clone());
        Ok(())
    }

    fn end(self: Box<Self>) -> StoreResult<()> {
        let MemoryEditor { store, pending } = *self;
        let batch: Vec<String> = pending.iter().map(|f| f.source_id.clone()).collect();
        for fix in pending {
            store.fixes.insert(fix.source_id.clone(), fix);
        }
        store.committed_batches.push(batch);
        store.sessions_ended += 1;
        Ok(())
    }
}
