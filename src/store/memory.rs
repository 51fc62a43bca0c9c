//! In-memory tabular store
//!
//! Used by tests and by callers embedding the engine without files.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{Cell, Row, Table, TabularStore};
use crate::error::{BunkerError, BunkerResult};

/// Tables held in memory behind a lock so the store can be shared by `&self`
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Table, Vec<Row>>>,
}

impl MemoryStore {
    /// Create a store with every required table present and empty
    pub fn new() -> Self {
        let tables = Table::all()
            .into_iter()
            .filter(|t| !t.is_optional())
            .map(|t| (t, Vec::new()))
            .collect();
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Builder-style helper replacing the rows of a table
    pub fn with_table(self, table: Table, rows: Vec<Row>) -> Self {
        if let Ok(mut tables) = self.tables.write() {
            tables.insert(table, rows);
        }
        self
    }

    /// Drop a table entirely
    pub fn remove_table(&self, table: Table) -> BunkerResult<()> {
        let mut tables = self.tables.write().map_err(|e| {
            BunkerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        tables.remove(&table);
        Ok(())
    }

    /// Number of data rows in a table (0 when absent)
    pub fn row_count(&self, table: Table) -> usize {
        self.tables
            .read()
            .map(|t| t.get(&table).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TabularStore for MemoryStore {
    fn read_table(&self, table: Table) -> BunkerResult<Vec<Row>> {
        let tables = self.tables.read().map_err(|e| {
            BunkerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        match tables.get(&table) {
            Some(rows) => Ok(rows.clone()),
            None if table.is_optional() => Ok(Vec::new()),
            None => Err(BunkerError::table_not_found(table.name())),
        }
    }

    fn update_cell(
        &self,
        table: Table,
        row: usize,
        column: usize,
        value: Cell,
    ) -> BunkerResult<()> {
        let mut tables = self.tables.write().map_err(|e| {
            BunkerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let rows = tables
            .get_mut(&table)
            .ok_or_else(|| BunkerError::table_not_found(table.name()))?;
        let target = rows.get_mut(row).ok_or_else(|| {
            BunkerError::Storage(format!("Row {} out of range in {}", row, table))
        })?;

        if target.len() <= column {
            target.resize(column + 1, Cell::Empty);
        }
        target[column] = value;
        Ok(())
    }

    fn append_row(&self, table: Table, row: Row) -> BunkerResult<()> {
        let mut tables = self.tables.write().map_err(|e| {
            BunkerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        tables.entry(table).or_default().push(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_has_required_tables() {
        let store = MemoryStore::new();
        assert!(store.read_table(Table::Balances).unwrap().is_empty());
        assert!(store.read_table(Table::CreditCards).unwrap().is_empty());
    }

    #[test]
    fn test_missing_required_table_fails() {
        let store = MemoryStore::new();
        store.remove_table(Table::Configuration).unwrap();
        let err = store.read_table(Table::Configuration).unwrap_err();
        assert!(matches!(err, BunkerError::Storage(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_append_and_update() {
        let store = MemoryStore::new();
        store
            .append_row(Table::Balances, vec!["Visa".into(), "Comida".into()])
            .unwrap();
        store
            .update_cell(Table::Balances, 0, 2, Cell::Number(80.0))
            .unwrap();

        let rows = store.read_table(Table::Balances).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][2], Cell::Number(80.0));
    }

    #[test]
    fn test_update_out_of_range_fails() {
        let store = MemoryStore::new();
        let err = store
            .update_cell(Table::Balances, 3, 2, Cell::Number(1.0))
            .unwrap_err();
        assert!(matches!(err, BunkerError::Storage(_)));
    }
}
