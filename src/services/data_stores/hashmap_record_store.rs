use std::collections::HashMap;

use crate::domain::{Record, RecordStore, RecordStoreError};

pub struct HashmapRecordStore<R: Record> {
    records: HashMap<R::Id, R>,
    creation_order: Vec<R::Id>,
}

impl<R: Record> Default for HashmapRecordStore<R> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            creation_order: Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl<R: Record> RecordStore<R> for HashmapRecordStore<R> {
    async fn list(&self) -> Result<Vec<R>, RecordStoreError> {
        Ok(self
            .creation_order
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect())
    }

    async fn get(&self, id: &R::Id) -> Result<R, RecordStoreError> {
        self.records
            .get(id)
            .cloned()
            .ok_or(RecordStoreError::RecordNotFound)
    }

    async fn add(&mut self, record: R) -> Result<(), RecordStoreError> {
        let id = record.id();
        if self.records.contains_key(&id) {
            return Err(RecordStoreError::RecordIDExists);
        }

        self.creation_order.push(id);
        self.records.insert(id, record);
        Ok(())
    }

    async fn replace(&mut self, record: R) -> Result<(), RecordStoreError> {
        match self.records.get_mut(&record.id()) {
            Some(stored) => {
                *stored = record;
                Ok(())
            }
            None => Err(RecordStoreError::RecordNotFound),
        }
    }

    async fn delete(&mut self, id: &R::Id) -> Result<R, RecordStoreError> {
        let record = self
            .records
            .remove(id)
            .ok_or(RecordStoreError::RecordNotFound)?;
        self.creation_order.retain(|r| r != id);
        Ok(record)
    }
}
