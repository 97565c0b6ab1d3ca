//! Integration tests for the grid layout manager and its designer format.

use threepane::grid::{CellAddr, CellConfig, GridConfigError, GridLayout, Occupancy};

/// A 3x3 IDE-style layout:
///
/// ```text
/// nav | editor editor
/// nav | editor editor
/// log | log    | tools
/// ```
fn ide_grid() -> GridLayout {
    let mut grid = GridLayout::new(3, 3);
    grid.insert_cell(
        CellAddr::new(0, 0),
        CellConfig::new("nav")
            .span(2, 1)
            .expand(0, 1, 0, 0)
            .fill_detached_space(true)
            .priority(2),
    )
    .unwrap();
    grid.insert_cell(
        CellAddr::new(0, 1),
        CellConfig::new("editor")
            .span(2, 2)
            .expand(0, 1, 1, 0)
            .fill_detached_space(true)
            .priority(5),
    )
    .unwrap();
    grid.insert_cell(
        CellAddr::new(2, 0),
        CellConfig::new("log")
            .span(1, 2)
            .expand(1, 0, 0, 1)
            .fill_detached_space(true)
            .priority(1),
    )
    .unwrap();
    grid.insert_cell(
        CellAddr::new(2, 2),
        CellConfig::new("tools").icon("tools.png").color("#446688"),
    )
    .unwrap();
    grid
}

fn resolved(grid: &GridLayout, addr: CellAddr) -> (usize, usize, usize, usize) {
    let cell = grid
        .resolve()
        .into_iter()
        .find(|c| c.addr == addr)
        .expect("cell should be visible");
    (cell.row, cell.col, cell.rowspan, cell.colspan)
}

#[test]
fn initial_resolution_uses_declared_spans() {
    let grid = ide_grid();
    assert_eq!(resolved(&grid, CellAddr::new(0, 0)), (0, 0, 2, 1));
    assert_eq!(resolved(&grid, CellAddr::new(0, 1)), (0, 1, 2, 2));
    assert_eq!(resolved(&grid, CellAddr::new(2, 0)), (2, 0, 1, 2));
    assert_eq!(resolved(&grid, CellAddr::new(2, 2)), (2, 2, 1, 1));
}

#[test]
fn single_detach_grows_full_strips_only() {
    let mut grid = ide_grid();
    assert!(grid.detach(CellAddr::new(2, 0)));

    // Editor's down strip spans columns 1-2, and (2,2) still belongs to
    // tools, so it cannot grow despite its higher priority.
    assert_eq!(resolved(&grid, CellAddr::new(0, 1)), (0, 1, 2, 2));
    // Nav's strip is exactly the vacated (2,0).
    assert_eq!(resolved(&grid, CellAddr::new(0, 0)), (0, 0, 3, 1));
    // The unclaimed half of the log region stays vacated.
    assert_eq!(grid.occupancy()[2 * 3 + 1], Occupancy::Vacated);
}

#[test]
fn fillers_claim_vacated_regions_under_their_columns() {
    let mut grid = ide_grid();
    grid.detach(CellAddr::new(2, 0));
    grid.detach(CellAddr::new(2, 2));

    // With the whole bottom row vacated both fillers grow down.
    assert_eq!(resolved(&grid, CellAddr::new(0, 1)), (0, 1, 3, 2));
    assert_eq!(resolved(&grid, CellAddr::new(0, 0)), (0, 0, 3, 1));
}

#[test]
fn expansion_claims_whole_strips_only() {
    let mut grid = ide_grid();
    // Vacate the editor block. Log may grow up, but its span covers
    // columns 0-1 and (1,0) still belongs to nav, so the strip above it
    // cannot be claimed.
    grid.detach(CellAddr::new(0, 1));

    assert_eq!(resolved(&grid, CellAddr::new(2, 0)), (2, 0, 1, 2));
    // The unclaimed editor region stays vacated.
    let occupancy = grid.occupancy();
    assert_eq!(occupancy[1], Occupancy::Vacated);
    assert_eq!(occupancy[2], Occupancy::Vacated);
}

#[test]
fn reattach_returns_to_declared_spans() {
    let mut grid = ide_grid();
    grid.detach(CellAddr::new(2, 0));
    assert_eq!(resolved(&grid, CellAddr::new(0, 0)), (0, 0, 3, 1));

    assert!(grid.reattach(CellAddr::new(2, 0)));
    assert_eq!(resolved(&grid, CellAddr::new(0, 0)), (0, 0, 2, 1));
    assert_eq!(resolved(&grid, CellAddr::new(2, 0)), (2, 0, 1, 2));
}

#[test]
fn resolution_is_idempotent_across_state_changes() {
    let mut grid = ide_grid();
    assert_eq!(grid.resolve(), grid.resolve());
    grid.detach(CellAddr::new(2, 0));
    assert_eq!(grid.resolve(), grid.resolve());
    grid.detach(CellAddr::new(2, 2));
    assert_eq!(grid.resolve(), grid.resolve());
}

#[test]
fn export_import_round_trip_preserves_configuration() {
    let grid = ide_grid();
    let config = grid.to_config();
    let json = grid.to_json().unwrap();

    let restored = GridLayout::from_json(&json).unwrap();
    assert_eq!(restored.to_config(), config);
    assert_eq!(restored.grid_size(), grid.grid_size());
    // Same keys in the same order, same per-cell fields.
    let original: Vec<_> = grid.cells().collect();
    let round_tripped: Vec<_> = restored.cells().collect();
    assert_eq!(original, round_tripped);
}

#[test]
fn round_trip_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");

    let grid = ide_grid();
    std::fs::write(&path, grid.to_json().unwrap()).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    let restored = GridLayout::from_json(&json).unwrap();
    assert_eq!(restored.to_config(), grid.to_config());
}

#[test]
fn import_rejects_malformed_keys() {
    let json = r#"{
        "grid_size": { "rows": 2, "cols": 2 },
        "cells": { "north-west": { "name": "nav" } }
    }"#;
    let err = GridLayout::from_json(json).unwrap_err();
    assert!(matches!(err, GridConfigError::InvalidKey(key) if key == "north-west"));
}

#[test]
fn import_rejects_cells_outside_the_grid() {
    let json = r#"{
        "grid_size": { "rows": 2, "cols": 2 },
        "cells": { "1,1": { "name": "big", "initial_colspan": 2 } }
    }"#;
    let err = GridLayout::from_json(json).unwrap_err();
    assert!(matches!(err, GridConfigError::OutOfBounds { .. }));
}

#[test]
fn import_rejects_overlapping_cells() {
    let json = r#"{
        "grid_size": { "rows": 2, "cols": 2 },
        "cells": {
            "0,0": { "name": "wide", "initial_colspan": 2 },
            "0,1": { "name": "clash" }
        }
    }"#;
    let err = GridLayout::from_json(json).unwrap_err();
    assert!(matches!(err, GridConfigError::Overlap { .. }));
}

#[test]
fn resolved_cells_map_to_grid_styles() {
    let mut grid = ide_grid();
    grid.detach(CellAddr::new(2, 0));

    for cell in grid.resolve() {
        let style = cell.style();
        assert_eq!(
            style.layout.grid_row.start,
            taffy::style_helpers::TaffyGridLine::from_line_index(cell.row as i16 + 1),
        );
        assert_eq!(
            style.layout.grid_column.start,
            taffy::style_helpers::TaffyGridLine::from_line_index(cell.col as i16 + 1),
        );
    }
}
