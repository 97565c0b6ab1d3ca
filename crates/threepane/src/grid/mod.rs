//! Grid-based dynamic layout.
//!
//! Generalizes the three-pane model to an N×M grid of named cells with
//! per-cell expansion metadata. [`GridLayout`] resolves each visible
//! cell's occupied span from its declaration plus the space vacated by
//! detached neighbors; [`GridConfig`] is the flat JSON document the
//! designer exports and imports.
//!
//! ```
//! use threepane::grid::{CellAddr, CellConfig, GridLayout};
//!
//! let mut grid = GridLayout::new(2, 2);
//! grid.insert_cell(
//!     CellAddr::new(0, 0),
//!     CellConfig::new("nav").expand(0, 1, 0, 0).fill_detached_space(true),
//! )
//! .unwrap();
//! grid.insert_cell(CellAddr::new(1, 0), CellConfig::new("log")).unwrap();
//!
//! grid.detach(CellAddr::new(1, 0));
//! let nav = grid.resolve()[0];
//! assert_eq!(nav.rowspan, 2);
//! ```

mod config;
mod layout;

pub use config::{CellAddr, CellConfig, GridConfig, GridConfigError, GridSize};
pub use layout::{GridLayout, Occupancy, ResolvedCell};
