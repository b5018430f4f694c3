//! Lattice geometry builder: the column map and the CPS rod population it
//! implies.

use crate::constants::{COLUMN_LAYOUT, CPS_LAYOUT, W};
use crate::rod::RodKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    None,
    /// Fuel channel or Control-and-Protection-System channel.
    FcCps,
    /// Reflector (graphite) column.
    Rr,
    /// Reflector coolant channel.
    Rrc,
}

/// Builds the 56x56 column map. Four-fold mirror symmetry about the
/// geometric center, per spec.md §4.1.
pub fn build_columns() -> [[ColumnType; W]; W] {
    let mut columns = [[ColumnType::None; W]; W];
    let half = W as f64 / 2.0;
    for (i, row) in columns.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let i0 = ((i as f64) - half + 0.5).abs().floor() as i64;
            let j0 = ((j as f64) - half + 0.5).abs().floor() as i64;
            *cell = if i0.max(j0) <= 16 {
                ColumnType::FcCps
            } else if i0.min(j0) > 19 {
                ColumnType::None
            } else {
                let a = i0.min(j0) as usize;
                let b = i0.max(j0) as usize;
                let row_idx = b - 17;
                let word = COLUMN_LAYOUT[row_idx * 2 + a / 16];
                let shift = 15 - (a % 16);
                match (word >> (shift * 2)) & 0x3 {
                    1 => ColumnType::Rrc,
                    2 => ColumnType::Rr,
                    3 => ColumnType::FcCps,
                    _ => ColumnType::None,
                }
            };
        }
    }
    columns
}

/// Expands the packed CPS sector table across all four octants, returning
/// `(x, y, kind)` for every control/safety/source rod site.
///
/// # Panics
///
/// Panics if the packed table ever assigns two rods to the same cell — the
/// table is a fixed compile-time constant, so this indicates a corrupted
/// geometry constant rather than a runtime condition callers can recover
/// from (spec.md §4.1: "any index collision... must abort construction").
pub fn expand_cps_rods() -> Vec<(usize, usize, RodKind)> {
    let mut seen = [[false; W]; W];
    let mut rods = Vec::new();
    for i in 0..17usize {
        for j in 0..9usize {
            let val = (CPS_LAYOUT[i] >> (24 - 3 * j)) & 0x7;
            let kind = match val {
                1 => Some(RodKind::Manual),
                2 => Some(RodKind::Short),
                3 => Some(RodKind::Automatic),
                4 => Some(RodKind::Source),
                _ => None,
            };
            let Some(kind) = kind else { continue };

            let i = i as i64;
            let j = j as i64;
            let positions = [
                (11 + 2 * i + 2 * j, 11 + 2 * i - 2 * j),
                (11 + 2 * i - 2 * j, 11 + 2 * i + 2 * j),
            ];
            let unique = if j == 0 { 1 } else { 2 };
            for &(x, y) in &positions[..unique] {
                assert!(
                    x >= 0 && (x as usize) < W && y >= 0 && (y as usize) < W,
                    "CPS geometry table produced an out-of-range rod site ({x},{y})"
                );
                let (x, y) = (x as usize, y as usize);
                assert!(
                    !seen[x][y],
                    "CPS geometry table produced overlapping rod assignment at ({x},{y})"
                );
                seen[x][y] = true;
                rods.push((x, y, kind));
            }
        }
    }
    rods
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_map_is_four_fold_symmetric() {
        let columns = build_columns();
        for i in 0..W {
            for j in 0..W {
                assert_eq!(
                    columns[i][j], columns[W - 1 - i][j],
                    "mirror across vertical axis failed at ({i},{j})"
                );
                assert_eq!(
                    columns[i][j], columns[i][W - 1 - j],
                    "mirror across horizontal axis failed at ({i},{j})"
                );
            }
        }
    }

    #[test]
    fn interior_square_is_all_fc_cps() {
        let columns = build_columns();
        // i0,j0 <= 16 forces FC_CPS; that's a 33x33 interior block.
        for i in 12..45 {
            for j in 12..45 {
                let half = W as f64 / 2.0;
                let i0 = ((i as f64) - half + 0.5).abs().floor() as i64;
                let j0 = ((j as f64) - half + 0.5).abs().floor() as i64;
                if i0.max(j0) <= 16 {
                    assert_eq!(columns[i][j], ColumnType::FcCps);
                }
            }
        }
    }

    #[test]
    fn cps_rod_count_matches_nonzero_table_entries() {
        let rods = expand_cps_rods();
        let mut expected = 0usize;
        for i in 0..17usize {
            for j in 0..9usize {
                let val = (CPS_LAYOUT[i] >> (24 - 3 * j)) & 0x7;
                if val > 0 {
                    expected += if j == 0 { 1 } else { 2 };
                }
            }
        }
        assert_eq!(rods.len(), expected);
    }

    #[test]
    fn cps_rods_land_inside_the_grid() {
        for (x, y, _) in expand_cps_rods() {
            assert!(x < W && y < W);
        }
    }
}
