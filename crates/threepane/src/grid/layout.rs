//! Dynamic grid layout resolution.
//!
//! [`GridLayout`] tracks an N×M grid of declared cells plus the set of
//! currently detached ones, and computes the occupied span of every
//! visible cell. Resolution is a pure function of the declarations and
//! the detached set, so re-running it on unchanged state yields identical
//! spans.

use std::cmp::Reverse;

use indexmap::IndexMap;
use threepane_core::alloc::HashSet;
use tracing::debug;

use crate::style::Style;

use super::config::{CellAddr, CellConfig, GridConfig, GridConfigError, GridSize};

/// What occupies one grid coordinate after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// No declared cell covers this coordinate.
    Empty,
    /// Covered by a visible cell, anchored at the given address.
    Visible(CellAddr),
    /// Initial region of a detached cell, not (yet) claimed by a neighbor.
    Vacated,
}

/// A visible cell's resolved placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCell {
    pub addr: CellAddr,
    pub row: usize,
    pub col: usize,
    pub rowspan: usize,
    pub colspan: usize,
}

impl ResolvedCell {
    /// Layout style placing this cell in a CSS-style grid (1-based lines).
    pub fn style(&self) -> Style {
        Style::new().grid_area(
            self.row as i16 + 1,
            self.rowspan as u16,
            self.col as i16 + 1,
            self.colspan as u16,
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

#[derive(Debug, Clone, Copy)]
struct Region {
    row: usize,
    col: usize,
    rowspan: usize,
    colspan: usize,
}

/// An N×M grid of dockable cells with expansion metadata.
#[derive(Debug)]
pub struct GridLayout {
    size: GridSize,
    cells: IndexMap<CellAddr, CellConfig>,
    detached: HashSet<CellAddr>,
}

impl GridLayout {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            size: GridSize { rows, cols },
            cells: IndexMap::new(),
            detached: HashSet::new(),
        }
    }

    pub fn grid_size(&self) -> GridSize {
        self.size
    }

    pub fn rows(&self) -> usize {
        self.size.rows
    }

    pub fn cols(&self) -> usize {
        self.size.cols
    }

    fn initial_region(&self, addr: CellAddr, config: &CellConfig) -> Region {
        Region {
            row: addr.row,
            col: addr.col,
            rowspan: config.initial_rowspan,
            colspan: config.initial_colspan,
        }
    }

    /// Declare a cell at its anchor address.
    ///
    /// Rejects anchors or initial spans outside the grid and regions
    /// overlapping an already declared cell.
    pub fn insert_cell(&mut self, addr: CellAddr, config: CellConfig) -> Result<(), GridConfigError> {
        let region = self.initial_region(addr, &config);
        if region.rowspan == 0
            || region.colspan == 0
            || region.row + region.rowspan > self.size.rows
            || region.col + region.colspan > self.size.cols
        {
            return Err(GridConfigError::OutOfBounds {
                addr,
                rows: self.size.rows,
                cols: self.size.cols,
            });
        }
        for (other, other_config) in &self.cells {
            if *other == addr {
                continue;
            }
            let o = self.initial_region(*other, other_config);
            let rows_overlap = region.row < o.row + o.rowspan && o.row < region.row + region.rowspan;
            let cols_overlap = region.col < o.col + o.colspan && o.col < region.col + region.colspan;
            if rows_overlap && cols_overlap {
                return Err(GridConfigError::Overlap {
                    addr,
                    other: *other,
                });
            }
        }
        self.cells.insert(addr, config);
        Ok(())
    }

    pub fn cell(&self, addr: CellAddr) -> Option<&CellConfig> {
        self.cells.get(&addr)
    }

    /// Declared cells in declaration order.
    pub fn cells(&self) -> impl Iterator<Item = (CellAddr, &CellConfig)> {
        self.cells.iter().map(|(addr, config)| (*addr, config))
    }

    pub fn is_detached(&self, addr: CellAddr) -> bool {
        self.detached.contains(&addr)
    }

    /// Detach a cell, vacating its grid region. Returns false for unknown,
    /// non-detachable, or already detached cells.
    pub fn detach(&mut self, addr: CellAddr) -> bool {
        let Some(config) = self.cells.get(&addr) else {
            debug!(cell = %addr, "detach ignored: unknown cell");
            return false;
        };
        if !config.detachable {
            debug!(cell = %addr, "detach ignored: cell not detachable");
            return false;
        }
        self.detached.insert(addr)
    }

    /// Reattach a detached cell. Returns false when it was not detached.
    pub fn reattach(&mut self, addr: CellAddr) -> bool {
        self.detached.remove(&addr)
    }

    /// Resolve every visible cell's occupied span, in declaration order.
    pub fn resolve(&self) -> Vec<ResolvedCell> {
        self.resolve_impl().0
    }

    /// Row-major occupancy of every grid coordinate after resolution.
    pub fn occupancy(&self) -> Vec<Occupancy> {
        self.resolve_impl().1
    }

    fn resolve_impl(&self) -> (Vec<ResolvedCell>, Vec<Occupancy>) {
        let rows = self.size.rows;
        let cols = self.size.cols;
        let mut grid = vec![Occupancy::Empty; rows * cols];
        let at = |row: usize, col: usize| row * cols + col;

        // Seed initial regions: attached cells are visible, detached ones
        // vacate theirs.
        let mut regions: IndexMap<CellAddr, Region> = IndexMap::new();
        for (addr, config) in &self.cells {
            let region = self.initial_region(*addr, config);
            let mark = if self.detached.contains(addr) {
                Occupancy::Vacated
            } else {
                regions.insert(*addr, region);
                Occupancy::Visible(*addr)
            };
            for row in region.row..(region.row + region.rowspan).min(rows) {
                for col in region.col..(region.col + region.colspan).min(cols) {
                    grid[at(row, col)] = mark;
                }
            }
        }

        // Claim vacated space: higher priority first, then declaration
        // order; directions are tried in a fixed order, one full strip of
        // the current span at a time.
        let mut claimants: Vec<CellAddr> = self
            .cells
            .iter()
            .filter(|(addr, config)| {
                config.fill_detached_space && !self.detached.contains(*addr)
            })
            .map(|(addr, _)| *addr)
            .collect();
        claimants.sort_by_key(|addr| {
            let decl = self.cells.get_index_of(addr).unwrap_or(usize::MAX);
            (Reverse(self.cells[addr].expansion_priority), decl)
        });

        for addr in claimants {
            let config = &self.cells[&addr];
            let mut region = regions[&addr];
            for direction in DIRECTIONS {
                let allowance = match direction {
                    Direction::Up => config.expand_up,
                    Direction::Down => config.expand_down,
                    Direction::Left => config.expand_left,
                    Direction::Right => config.expand_right,
                };
                for _ in 0..allowance {
                    let max_rows = config.max_rowspan.unwrap_or(usize::MAX);
                    let max_cols = config.max_colspan.unwrap_or(usize::MAX);
                    let strip: Option<Vec<(usize, usize)>> = match direction {
                        Direction::Up if region.row > 0 && region.rowspan < max_rows => Some(
                            (region.col..region.col + region.colspan)
                                .map(|c| (region.row - 1, c))
                                .collect(),
                        ),
                        Direction::Down
                            if region.row + region.rowspan < rows && region.rowspan < max_rows =>
                        {
                            Some(
                                (region.col..region.col + region.colspan)
                                    .map(|c| (region.row + region.rowspan, c))
                                    .collect(),
                            )
                        }
                        Direction::Left if region.col > 0 && region.colspan < max_cols => Some(
                            (region.row..region.row + region.rowspan)
                                .map(|r| (r, region.col - 1))
                                .collect(),
                        ),
                        Direction::Right
                            if region.col + region.colspan < cols && region.colspan < max_cols =>
                        {
                            Some(
                                (region.row..region.row + region.rowspan)
                                    .map(|r| (r, region.col + region.colspan))
                                    .collect(),
                            )
                        }
                        _ => None,
                    };
                    let Some(strip) = strip else { break };
                    if !strip
                        .iter()
                        .all(|&(r, c)| grid[at(r, c)] == Occupancy::Vacated)
                    {
                        break;
                    }
                    for &(r, c) in &strip {
                        grid[at(r, c)] = Occupancy::Visible(addr);
                    }
                    match direction {
                        Direction::Up => {
                            region.row -= 1;
                            region.rowspan += 1;
                        }
                        Direction::Down => region.rowspan += 1,
                        Direction::Left => {
                            region.col -= 1;
                            region.colspan += 1;
                        }
                        Direction::Right => region.colspan += 1,
                    }
                }
            }
            regions[&addr] = region;
        }

        let resolved = regions
            .into_iter()
            .map(|(addr, region)| ResolvedCell {
                addr,
                row: region.row,
                col: region.col,
                rowspan: region.rowspan,
                colspan: region.colspan,
            })
            .collect();
        (resolved, grid)
    }

    /// Export the declarations as a designer document.
    pub fn to_config(&self) -> GridConfig {
        GridConfig {
            grid_size: self.size,
            cells: self
                .cells
                .iter()
                .map(|(addr, config)| (addr.to_string(), config.clone()))
                .collect(),
        }
    }

    /// Import a designer document, validating keys, bounds, and overlaps.
    pub fn from_config(config: GridConfig) -> Result<Self, GridConfigError> {
        let mut layout = Self::new(config.grid_size.rows, config.grid_size.cols);
        for (key, cell) in config.cells {
            let addr: CellAddr = key.parse()?;
            layout.insert_cell(addr, cell)?;
        }
        Ok(layout)
    }

    pub fn to_json(&self) -> Result<String, GridConfigError> {
        self.to_config().to_json()
    }

    pub fn from_json(json: &str) -> Result<Self, GridConfigError> {
        Self::from_config(GridConfig::from_json(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> GridLayout {
        let mut grid = GridLayout::new(2, 2);
        grid.insert_cell(
            CellAddr::new(0, 0),
            CellConfig::new("nav").expand(0, 1, 0, 0).fill_detached_space(true),
        )
        .unwrap();
        grid.insert_cell(CellAddr::new(0, 1), CellConfig::new("editor"))
            .unwrap();
        grid.insert_cell(CellAddr::new(1, 0), CellConfig::new("log"))
            .unwrap();
        grid.insert_cell(CellAddr::new(1, 1), CellConfig::new("tools"))
            .unwrap();
        grid
    }

    #[test]
    fn test_insert_rejects_out_of_bounds() {
        let mut grid = GridLayout::new(2, 2);
        let err = grid
            .insert_cell(CellAddr::new(1, 1), CellConfig::new("big").span(2, 1))
            .unwrap_err();
        assert!(matches!(err, GridConfigError::OutOfBounds { .. }));
    }

    #[test]
    fn test_insert_rejects_overlap() {
        let mut grid = GridLayout::new(3, 3);
        grid.insert_cell(CellAddr::new(0, 0), CellConfig::new("wide").span(1, 2))
            .unwrap();
        let err = grid
            .insert_cell(CellAddr::new(0, 1), CellConfig::new("clash"))
            .unwrap_err();
        assert!(matches!(err, GridConfigError::Overlap { .. }));
    }

    #[test]
    fn test_resolve_initial_spans() {
        let grid = two_by_two();
        let resolved = grid.resolve();
        assert_eq!(resolved.len(), 4);
        let nav = resolved.iter().find(|c| c.addr == CellAddr::new(0, 0)).unwrap();
        assert_eq!((nav.rowspan, nav.colspan), (1, 1));
    }

    #[test]
    fn test_detached_neighbor_space_is_claimed() {
        let mut grid = two_by_two();
        assert!(grid.detach(CellAddr::new(1, 0)));

        let resolved = grid.resolve();
        assert_eq!(resolved.len(), 3);
        let nav = resolved.iter().find(|c| c.addr == CellAddr::new(0, 0)).unwrap();
        // nav grows down into the vacated log cell.
        assert_eq!((nav.row, nav.rowspan), (0, 2));
    }

    #[test]
    fn test_no_fill_flag_means_no_growth() {
        let mut grid = two_by_two();
        grid.detach(CellAddr::new(1, 1));

        let resolved = grid.resolve();
        let editor = resolved
            .iter()
            .find(|c| c.addr == CellAddr::new(0, 1))
            .unwrap();
        // editor has no fill_detached_space, the vacated cell stays empty.
        assert_eq!((editor.rowspan, editor.colspan), (1, 1));
        assert_eq!(
            grid.occupancy()[1 * grid.cols() + 1],
            Occupancy::Vacated
        );
    }

    #[test]
    fn test_priority_breaks_claim_ties() {
        let mut grid = GridLayout::new(1, 3);
        grid.insert_cell(
            CellAddr::new(0, 0),
            CellConfig::new("low")
                .expand(0, 0, 0, 1)
                .fill_detached_space(true)
                .priority(1),
        )
        .unwrap();
        grid.insert_cell(CellAddr::new(0, 1), CellConfig::new("mid"))
            .unwrap();
        grid.insert_cell(
            CellAddr::new(0, 2),
            CellConfig::new("high")
                .expand(0, 0, 1, 0)
                .fill_detached_space(true)
                .priority(5),
        )
        .unwrap();

        grid.detach(CellAddr::new(0, 1));
        let resolved = grid.resolve();
        let high = resolved.iter().find(|c| c.addr == CellAddr::new(0, 2)).unwrap();
        let low = resolved.iter().find(|c| c.addr == CellAddr::new(0, 0)).unwrap();
        assert_eq!((high.col, high.colspan), (1, 2));
        assert_eq!((low.col, low.colspan), (0, 1));
    }

    #[test]
    fn test_max_span_caps_growth() {
        let mut grid = GridLayout::new(3, 1);
        grid.insert_cell(
            CellAddr::new(0, 0),
            CellConfig::new("capped")
                .expand(0, 2, 0, 0)
                .fill_detached_space(true)
                .max_span(2, 1),
        )
        .unwrap();
        grid.insert_cell(CellAddr::new(1, 0), CellConfig::new("a")).unwrap();
        grid.insert_cell(CellAddr::new(2, 0), CellConfig::new("b")).unwrap();
        grid.detach(CellAddr::new(1, 0));
        grid.detach(CellAddr::new(2, 0));

        let resolved = grid.resolve();
        let capped = resolved.iter().find(|c| c.addr == CellAddr::new(0, 0)).unwrap();
        assert_eq!(capped.rowspan, 2);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut grid = two_by_two();
        grid.detach(CellAddr::new(1, 0));
        assert_eq!(grid.resolve(), grid.resolve());

        grid.reattach(CellAddr::new(1, 0));
        let before = grid.resolve();
        let log = before.iter().find(|c| c.addr == CellAddr::new(1, 0)).unwrap();
        assert_eq!((log.rowspan, log.colspan), (1, 1));
    }

    #[test]
    fn test_detach_respects_detachable_flag() {
        let mut grid = GridLayout::new(1, 1);
        grid.insert_cell(CellAddr::new(0, 0), CellConfig::new("pinned").detachable(false))
            .unwrap();
        assert!(!grid.detach(CellAddr::new(0, 0)));
        assert!(!grid.is_detached(CellAddr::new(0, 0)));
    }

    #[test]
    fn test_double_detach_is_a_no_op() {
        let mut grid = two_by_two();
        assert!(grid.detach(CellAddr::new(0, 1)));
        assert!(!grid.detach(CellAddr::new(0, 1)));
        assert!(grid.reattach(CellAddr::new(0, 1)));
        assert!(!grid.reattach(CellAddr::new(0, 1)));
    }

    #[test]
    fn test_config_round_trip_preserves_cells() {
        let grid = two_by_two();
        let json = grid.to_json().unwrap();
        let restored = GridLayout::from_json(&json).unwrap();
        assert_eq!(restored.to_config(), grid.to_config());
    }

    #[test]
    fn test_resolved_cell_style_uses_one_based_lines() {
        let cell = ResolvedCell {
            addr: CellAddr::new(1, 0),
            row: 1,
            col: 0,
            rowspan: 2,
            colspan: 1,
        };
        let style = cell.style();
        assert_eq!(
            style.layout.grid_row.start,
            taffy::style_helpers::TaffyGridLine::from_line_index(2),
        );
    }
}
