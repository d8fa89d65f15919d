//! In-memory attribute source.
//!
//! Reference implementation of [`AttributeSource`] backed by plain maps.
//! Predicates are not evaluated as SQL — query execution belongs to the
//! external driver — so predicate results are registered up front with
//! [`MemoryAttributeSource::set_predicate_result`].
//!
//! Fault injection (`set_unreachable`, `set_failing`) simulates an
//! unreachable database and failing queries, and `open_handles()` exposes
//! the live-handle count so tests can assert close-on-every-path.

use hashbrown::HashMap;
use parking_lot::Mutex;

use crate::model::Category;
use crate::{Error, Result};

use super::{AttributeSource, CatValueMap, FieldInfo};

// ============================================================================
// MemoryAttributeSource
// ============================================================================

/// In-memory attribute tables with canned predicate results.
#[derive(Debug, Default)]
pub struct MemoryAttributeSource {
    /// table → column → (category → value)
    tables: HashMap<String, HashMap<String, HashMap<Category, f64>>>,
    /// predicate string → matching key-column categories
    predicates: HashMap<String, Vec<Category>>,
    unreachable: bool,
    failing: bool,
    live_handles: Mutex<u64>,
    next_handle: Mutex<u64>,
}

/// Opaque handle issued by [`MemoryAttributeSource::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverHandle(u64);

impl MemoryAttributeSource {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Fixture API
    // ========================================================================

    /// Insert one attribute row value: `table.column[cat] = value`.
    pub fn insert(&mut self, table: &str, column: &str, cat: i32, value: f64) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .entry(column.to_string())
            .or_default()
            .insert(Category(cat), value);
    }

    /// Register the categories a predicate evaluates to. Unregistered
    /// predicates fail as recoverable query errors.
    pub fn set_predicate_result(&mut self, predicate: &str, cats: Vec<i32>) {
        self.predicates
            .insert(predicate.to_string(), cats.into_iter().map(Category).collect());
    }

    // ========================================================================
    // Fault injection
    // ========================================================================

    /// Make `open()` fail with the fatal database-open error.
    pub fn set_unreachable(&mut self, unreachable: bool) {
        self.unreachable = unreachable;
    }

    /// Make every query fail with a recoverable query error.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Number of handles currently open. Zero after any operation returns
    /// — success or failure — if the close discipline holds.
    pub fn open_handles(&self) -> u64 {
        *self.live_handles.lock()
    }

    fn check_query(&self) -> Result<()> {
        if self.failing {
            return Err(Error::AttributeQuery("simulated query failure".into()));
        }
        Ok(())
    }

    fn column(&self, table: &str, column: &str) -> Result<&HashMap<Category, f64>> {
        self.tables
            .get(table)
            .and_then(|t| t.get(column))
            .ok_or_else(|| {
                Error::AttributeQuery(format!("no column <{column}> in table <{table}>"))
            })
    }
}

// ============================================================================
// AttributeSource impl
// ============================================================================

impl AttributeSource for MemoryAttributeSource {
    type Handle = DriverHandle;

    fn open(&self, field: &FieldInfo) -> Result<DriverHandle> {
        if self.unreachable {
            return Err(Error::DatabaseOpen {
                driver: field.driver.clone(),
                database: field.database.clone(),
            });
        }
        let mut next = self.next_handle.lock();
        *next += 1;
        *self.live_handles.lock() += 1;
        Ok(DriverHandle(*next))
    }

    fn close(&self, _handle: DriverHandle) {
        let mut live = self.live_handles.lock();
        debug_assert!(*live > 0, "close without matching open");
        *live = live.saturating_sub(1);
    }

    fn select_categories(
        &self,
        _handle: &DriverHandle,
        _table: &str,
        _key_column: &str,
        predicate: &str,
    ) -> Result<Vec<Category>> {
        self.check_query()?;
        self.predicates.get(predicate).cloned().ok_or_else(|| {
            Error::AttributeQuery(format!("cannot evaluate predicate '{predicate}'"))
        })
    }

    fn select_values(
        &self,
        handle: &DriverHandle,
        table: &str,
        key_column: &str,
        value_column: &str,
        predicate: Option<&str>,
    ) -> Result<CatValueMap> {
        self.check_query()?;
        let column = self.column(table, value_column)?;
        match predicate {
            None => Ok(column.iter().map(|(&c, &v)| (c, v)).collect()),
            Some(pred) => {
                let cats = self.select_categories(handle, table, key_column, pred)?;
                Ok(cats
                    .iter()
                    .filter_map(|cat| column.get(cat).map(|&v| (*cat, v)))
                    .collect())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
