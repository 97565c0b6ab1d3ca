//! Serializable grid designer configuration.
//!
//! The exported document is flat and versionless: a `grid_size` plus a
//! `"row,col"`-keyed map of cell definitions. Export then import must
//! reproduce the identical mapping, so cells keep their declaration order
//! through an [`IndexMap`].

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Anchor address of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddr {
    pub row: usize,
    pub col: usize,
}

impl CellAddr {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for CellAddr {
    type Err = GridConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridConfigError::InvalidKey(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        Ok(Self {
            row: row.trim().parse().map_err(|_| invalid())?,
            col: col.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Errors raised by grid configuration and import.
#[derive(Debug, thiserror::Error)]
pub enum GridConfigError {
    /// A cells-map key was not of the form `"row,col"`.
    #[error("invalid cell key {0:?}, expected \"row,col\"")]
    InvalidKey(String),

    /// A cell's anchor or initial span falls outside the grid.
    #[error("cell {addr} does not fit a {rows}x{cols} grid")]
    OutOfBounds {
        addr: CellAddr,
        rows: usize,
        cols: usize,
    },

    /// Two cells declare overlapping initial regions.
    #[error("cell {addr} overlaps cell {other}")]
    Overlap { addr: CellAddr, other: CellAddr },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn one() -> usize {
    1
}

fn yes() -> bool {
    true
}

/// Designer metadata for one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Display color as a hex string ("#rrggbb").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "one")]
    pub initial_rowspan: usize,
    #[serde(default = "one")]
    pub initial_colspan: usize,
    /// Per-direction expansion allowances, in grid tracks.
    #[serde(default)]
    pub expand_up: usize,
    #[serde(default)]
    pub expand_down: usize,
    #[serde(default)]
    pub expand_left: usize,
    #[serde(default)]
    pub expand_right: usize,
    /// Whether this cell may grow into space vacated by detached neighbors.
    #[serde(default)]
    pub fill_detached_space: bool,
    /// Higher priority claims contested vacated space first.
    #[serde(default)]
    pub expansion_priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rowspan: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_colspan: Option<usize>,
    #[serde(default = "yes")]
    pub detachable: bool,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            icon: None,
            color: None,
            initial_rowspan: 1,
            initial_colspan: 1,
            expand_up: 0,
            expand_down: 0,
            expand_left: 0,
            expand_right: 0,
            fill_detached_space: false,
            expansion_priority: 0,
            max_rowspan: None,
            max_colspan: None,
            detachable: true,
        }
    }
}

impl CellConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn span(mut self, rowspan: usize, colspan: usize) -> Self {
        self.initial_rowspan = rowspan.max(1);
        self.initial_colspan = colspan.max(1);
        self
    }

    /// Set all four expansion allowances at once.
    pub fn expand(mut self, up: usize, down: usize, left: usize, right: usize) -> Self {
        self.expand_up = up;
        self.expand_down = down;
        self.expand_left = left;
        self.expand_right = right;
        self
    }

    pub fn fill_detached_space(mut self, fill: bool) -> Self {
        self.fill_detached_space = fill;
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.expansion_priority = priority;
        self
    }

    pub fn max_span(mut self, rowspan: usize, colspan: usize) -> Self {
        self.max_rowspan = Some(rowspan);
        self.max_colspan = Some(colspan);
        self
    }

    pub fn detachable(mut self, detachable: bool) -> Self {
        self.detachable = detachable;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

/// The exported designer document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub grid_size: GridSize,
    /// Cell definitions keyed by `"row,col"`, in declaration order.
    pub cells: IndexMap<String, CellConfig>,
}

impl GridConfig {
    pub fn to_json(&self) -> Result<String, GridConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GridConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_addr_round_trip() {
        let addr = CellAddr::new(2, 5);
        assert_eq!(addr.to_string(), "2,5");
        assert_eq!("2,5".parse::<CellAddr>().unwrap(), addr);
        assert_eq!(" 2 , 5 ".parse::<CellAddr>().unwrap(), addr);
    }

    #[test]
    fn test_cell_addr_rejects_garbage() {
        for bad in ["", "2", "2;5", "a,b", "1,2,3"] {
            assert!(
                bad.parse::<CellAddr>().is_err(),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_cell_config_defaults_from_empty_json() {
        let cell: CellConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cell.initial_rowspan, 1);
        assert_eq!(cell.initial_colspan, 1);
        assert_eq!(cell.expand_up, 0);
        assert!(!cell.fill_detached_space);
        assert!(cell.detachable);
    }

    #[test]
    fn test_grid_config_json_round_trip() {
        let mut cells = IndexMap::new();
        cells.insert(
            "0,0".to_string(),
            CellConfig::new("nav").expand(0, 1, 0, 0).fill_detached_space(true),
        );
        cells.insert(
            "1,0".to_string(),
            CellConfig::new("log").priority(3).max_span(2, 1),
        );
        let config = GridConfig {
            grid_size: GridSize { rows: 2, cols: 2 },
            cells,
        };

        let json = config.to_json().unwrap();
        let restored = GridConfig::from_json(&json).unwrap();
        assert_eq!(restored, config);
        // Declaration order survives the round trip.
        assert_eq!(
            restored.cells.keys().collect::<Vec<_>>(),
            vec!["0,0", "1,0"],
        );
    }
}
