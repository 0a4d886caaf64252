//! Table Bookings
//!
//! A table-scoped ordering flow carries its table ids in the route, joined
//! by dashes (`3-7-12`). They are kept in a booking record next to whatever
//! else the booking flow has stored.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use thiserror::Error;

use crate::ids::TypedId;

/// Marker for table ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {}

/// Table Id
pub type TableId = TypedId<Table>;

/// Errors that can occur while reading table ids.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    /// No table ids were given.
    #[error("no tables given")]
    Empty,

    /// A segment is not a table id.
    #[error("invalid table id {0:?}")]
    InvalidTable(String),
}

/// Table ids for one booking, in route order and without repeats.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableIds(SmallVec<[TableId; 4]>);

impl TableIds {
    /// The ids as a slice.
    pub fn as_slice(&self) -> &[TableId] {
        &self.0
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no tables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for TableIds {
    type Err = BookingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();

        if raw.is_empty() {
            return Err(BookingError::Empty);
        }

        let mut ids = SmallVec::new();

        for segment in raw.split('-') {
            let id = segment
                .parse::<TableId>()
                .map_err(|_err| BookingError::InvalidTable(segment.to_string()))?;

            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        Ok(Self(ids))
    }
}

impl Display for TableIds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (idx, id) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("-")?;
            }

            write!(f, "{id}")?;
        }

        Ok(())
    }
}

/// Persisted booking state.
///
/// Fields written by other parts of the booking flow are carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookingInfo {
    /// Tables the guest is ordering for.
    #[serde(default, rename = "tableIds")]
    pub table_ids: Vec<TableId>,

    /// Everything else in the record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookingInfo {
    /// Replace the table ids, keeping every other field.
    #[must_use]
    pub fn with_tables(mut self, tables: &TableIds) -> Self {
        self.table_ids = tables.as_slice().to_vec();
        self
    }
}
