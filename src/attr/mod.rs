//! # Attribute Store Trait
//!
//! Contract between vecnet-prep and the attribute-database driver. Query
//! execution and the driver itself are out of scope; this crate only needs
//! bulk category→value fetches and predicate-driven category selection.
//!
//! ## Implementations
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `MemoryAttributeSource` | `memory` | In-memory tables with fault injection |

pub mod memory;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::Result;

pub use memory::MemoryAttributeSource;

// ============================================================================
// Layer link configuration
// ============================================================================

/// Attribute-table link for one layer: which driver and database to open,
/// and which table/key column to join categories against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub driver: String,
    pub database: String,
    pub table: String,
    pub key_column: String,
}

impl FieldInfo {
    pub fn new(
        driver: impl Into<String>,
        database: impl Into<String>,
        table: impl Into<String>,
        key_column: impl Into<String>,
    ) -> Self {
        Self {
            driver: driver.into(),
            database: database.into(),
            table: table.into(),
            key_column: key_column.into(),
        }
    }
}

// ============================================================================
// Bulk fetch result
// ============================================================================

/// Result of one bulk fetch: the full `category → value` mapping for a
/// column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatValueMap {
    values: HashMap<Category, f64>,
}

impl CatValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cat: Category, value: f64) {
        self.values.insert(cat, value);
    }

    /// Value for a category. Absence is expected on sparse attribute data
    /// and is not an error.
    pub fn lookup(&self, cat: Category) -> Option<f64> {
        self.values.get(&cat).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Category, f64)> for CatValueMap {
    fn from_iter<I: IntoIterator<Item = (Category, f64)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

// ============================================================================
// AttributeSource Trait
// ============================================================================

/// Bulk read access to an attribute database.
///
/// `open()` failures are configuration faults — implementations return the
/// fatal [`crate::Error::DatabaseOpen`] — while query failures are
/// recoverable [`crate::Error::AttributeQuery`] faults. Callers rely on
/// that asymmetry.
pub trait AttributeSource {
    /// Opaque driver/connection handle.
    type Handle;

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Open the driver and database named by a layer's [`FieldInfo`].
    fn open(&self, field: &FieldInfo) -> Result<Self::Handle>;

    /// Close a handle. Infallible by contract; a driver that cannot even
    /// close cleanly has nothing useful to report to this subsystem.
    fn close(&self, handle: Self::Handle);

    // ========================================================================
    // Queries
    // ========================================================================

    /// Evaluate a SQL-style predicate against the table and return the
    /// key-column categories of all matching rows.
    fn select_categories(
        &self,
        handle: &Self::Handle,
        table: &str,
        key_column: &str,
        predicate: &str,
    ) -> Result<Vec<Category>>;

    /// Fetch the full `category → value` mapping for a column in one
    /// query, optionally restricted by a predicate.
    fn select_values(
        &self,
        handle: &Self::Handle,
        table: &str,
        key_column: &str,
        value_column: &str,
        predicate: Option<&str>,
    ) -> Result<CatValueMap>;

    /// Fetch `category → value` pairs for an explicit category list.
    ///
    /// Default: full-column fetch, then filter. Drivers with an `IN`-list
    /// fast path should override.
    fn select_values_for(
        &self,
        handle: &Self::Handle,
        table: &str,
        key_column: &str,
        value_column: &str,
        cats: &[Category],
    ) -> Result<CatValueMap> {
        let all = self.select_values(handle, table, key_column, value_column, None)?;
        Ok(cats
            .iter()
            .filter_map(|&cat| all.lookup(cat).map(|v| (cat, v)))
            .collect())
    }
}

// ============================================================================
// DriverGuard
// ============================================================================

/// Scope guard for a driver handle: closes on drop, so every exit path of
/// an operation releases the connection.
pub struct DriverGuard<'a, A: AttributeSource> {
    source: &'a A,
    handle: Option<A::Handle>,
}

impl<'a, A: AttributeSource> DriverGuard<'a, A> {
    /// Open a handle for the given layer link.
    pub fn open(source: &'a A, field: &FieldInfo) -> Result<Self> {
        let handle = source.open(field)?;
        Ok(Self { source, handle: Some(handle) })
    }

    pub fn handle(&self) -> &A::Handle {
        self.handle.as_ref().expect("handle present until drop")
    }
}

impl<A: AttributeSource> Drop for DriverGuard<'_, A> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.source.close(handle);
        }
    }
}
