//! Neutron flux diffusion solver: sub-stepped reaction-diffusion over the
//! 56x56xA lattice.

use ndarray::Array3;

use crate::constants::{
    ABSORBER_LENGTH, AXIAL_SECTIONS, B4C_ABS_MCS, B4C_VOLUME, COOLANT_VOLUME, ENRICHMENT,
    GRAPHITE_ABS_MCS, GRAPHITE_VOLUME, GRAPHITE_WIDTH, PROMPT_GEN_TIME, RRC_COOLANT_VOLUME,
    RR_GRAPHITE_VOLUME, SHORT_ABSORBER_LENGTH, SOURCE_LENGTH, SOURCE_STRENGTH, U235_ABS_MCS,
    U235_FISSION_MCS, U235_NEUTRONS, U238_ABS_MCS, U_VOLUME, WATER_ABS_MCS, W,
};
use crate::geometry::ColumnType;
use crate::rod::{Rod, RodKind};

/// Fraction of `[z0, z0+gw)` covered by `[lo, lo+len)`, clamped to `[0, 1]`.
fn overlap_fraction(lo: f64, len: f64, z0: f64, gw: f64) -> f64 {
    let hi = lo + len;
    let cell_hi = z0 + gw;
    (hi.min(cell_hi) - lo.max(z0)).max(0.0) / gw
}

/// Per-cell dimensionless reaction gain and any constant (source) term,
/// following spec.md §4.5.
fn reaction_gain(column: ColumnType, rod: &Rod, k: usize, z0: f64) -> (f64, f64) {
    let mut g = 0.0;
    let mut constant_source = 0.0;

    match column {
        ColumnType::FcCps => {
            match rod.kind {
                RodKind::Source => {
                    constant_source =
                        overlap_fraction(rod.pos_z, SOURCE_LENGTH, z0, GRAPHITE_WIDTH)
                            * SOURCE_STRENGTH;
                }
                RodKind::Manual | RodKind::Automatic | RodKind::Short => {
                    let len = if matches!(rod.kind, RodKind::Short) {
                        SHORT_ABSORBER_LENGTH
                    } else {
                        ABSORBER_LENGTH
                    };
                    let f = overlap_fraction(rod.pos_z, len, z0, GRAPHITE_WIDTH);
                    g -= f * B4C_VOLUME * B4C_ABS_MCS;
                    g -= (1.0 - f) * B4C_VOLUME * WATER_ABS_MCS;
                }
                RodKind::Fuel => {
                    // Spec.md §4.5 gates fuel's contribution on `2 <= k < W - 2`
                    // using the lattice width W (56), not the axial section
                    // count (32) — with AXIAL_SECTIONS == 32 the upper bound
                    // never binds, so this reduces to `k >= 2`.
                    if k >= 2 && k < W - 2 {
                        let u235_fission = ENRICHMENT * U235_FISSION_MCS;
                        let u235_capture = ENRICHMENT * U235_ABS_MCS;
                        let u238_capture = (1.0 - ENRICHMENT) * U238_ABS_MCS;
                        g += U_VOLUME
                            * (u235_fission * (U235_NEUTRONS - 1.0) - u235_capture - u238_capture);
                    }
                }
                RodKind::None => {}
            }
            g -= COOLANT_VOLUME * WATER_ABS_MCS;
            g -= GRAPHITE_VOLUME * GRAPHITE_ABS_MCS;
        }
        ColumnType::Rr => {
            g -= RR_GRAPHITE_VOLUME * GRAPHITE_ABS_MCS;
        }
        ColumnType::Rrc => {
            g -= GRAPHITE_VOLUME * GRAPHITE_ABS_MCS;
            g -= RRC_COOLANT_VOLUME * WATER_ABS_MCS;
        }
        ColumnType::None => {}
    }

    (g, constant_source)
}

fn reaction(
    flux: &Array3<f64>,
    scratch: &mut Array3<f64>,
    columns: &[[ColumnType; W]; W],
    rods: &[[Rod; W]; W],
) {
    for i in 0..W {
        for j in 0..W {
            let rod = &rods[i][j];
            let column = columns[i][j];
            for k in 0..AXIAL_SECTIONS {
                let z0 = k as f64 * GRAPHITE_WIDTH;
                let n = flux[[i, j, k]];
                let (g, constant_source) = reaction_gain(column, rod, k, z0);
                scratch[[i, j, k]] = n * (1.0 + g.max(-1.0)) + constant_source;
            }
        }
    }
}

/// 6-neighbor diffusion with Dirichlet (zero-flux) boundaries, reading the
/// post-reaction buffer and writing the next iteration's field.
fn diffuse(scratch: &Array3<f64>, flux: &mut Array3<f64>) {
    const ALPHA: f64 = 1.0 / 9.0;
    const BETA: f64 = (1.0 - ALPHA) / 6.0;

    for i in 0..W {
        for j in 0..W {
            for k in 0..AXIAL_SECTIONS {
                let center = scratch[[i, j, k]];
                let mut neighbors = 0.0;
                if i > 0 {
                    neighbors += scratch[[i - 1, j, k]];
                }
                if i < W - 1 {
                    neighbors += scratch[[i + 1, j, k]];
                }
                if j > 0 {
                    neighbors += scratch[[i, j - 1, k]];
                }
                if j < W - 1 {
                    neighbors += scratch[[i, j + 1, k]];
                }
                if k > 0 {
                    neighbors += scratch[[i, j, k - 1]];
                }
                if k < AXIAL_SECTIONS - 1 {
                    neighbors += scratch[[i, j, k + 1]];
                }
                flux[[i, j, k]] = ALPHA * center + BETA * neighbors;
            }
        }
    }
}

/// Advances the flux field by `dt`, sub-stepped into `floor(dt / tau)`
/// reaction-then-diffusion iterations.
pub fn step(
    flux: &mut Array3<f64>,
    scratch: &mut Array3<f64>,
    columns: &[[ColumnType; W]; W],
    rods: &[[Rod; W]; W],
    dt: f64,
) {
    let n_substeps = (dt / PROMPT_GEN_TIME).floor().max(0.0) as usize;
    for _ in 0..n_substeps {
        reaction(flux, scratch, columns, rods);
        diffuse(scratch, flux);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::W;

    #[test]
    fn overlap_fraction_is_clamped_to_unit_interval() {
        assert_eq!(overlap_fraction(0.0, 1.0, 0.0, 0.25), 1.0);
        assert_eq!(overlap_fraction(-10.0, 1.0, 0.0, 0.25), 0.0);
        assert_eq!(overlap_fraction(10.0, 1.0, 0.0, 0.25), 0.0);
    }

    #[test]
    fn zero_flux_with_all_rods_fully_inserted_stays_zero() {
        let columns = crate::geometry::build_columns();
        let mut rods = [[Rod::empty(); W]; W];
        for (x, y, kind) in crate::geometry::expand_cps_rods() {
            rods[x][y] = Rod::new(kind);
        }
        // Manual/Automatic's maximum-absorber-overlap end is max_z (their
        // absorber then spans [max_z, max_z+len), deep into the core);
        // Short's is min_z, by the symmetric argument. These are each kind's
        // `Rod::new` default, so this loop is a no-op — spelled out for
        // clarity at the call site.
        for row in rods.iter_mut() {
            for rod in row.iter_mut() {
                match rod.kind {
                    RodKind::Manual | RodKind::Automatic => rod.pos_z = rod.max_z,
                    RodKind::Short => rod.pos_z = rod.min_z,
                    _ => {}
                }
            }
        }
        let mut flux = Array3::<f64>::zeros((W, W, AXIAL_SECTIONS));
        let mut scratch = flux.clone();
        for _ in 0..10 {
            step(&mut flux, &mut scratch, &columns, &rods, 0.05);
        }
        assert!(flux.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn flux_never_goes_negative() {
        let columns = crate::geometry::build_columns();
        let mut rods = [[Rod::empty(); W]; W];
        for (x, y, kind) in crate::geometry::expand_cps_rods() {
            rods[x][y] = Rod::new(kind);
        }
        let mut flux = Array3::<f64>::from_elem((W, W, AXIAL_SECTIONS), 1.0);
        let mut scratch = flux.clone();
        for _ in 0..20 {
            step(&mut flux, &mut scratch, &columns, &rods, 0.025);
        }
        assert!(flux.iter().all(|&v| v >= 0.0));
    }
}
