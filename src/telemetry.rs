//! Derived telemetry: total in-core flux, reactor period, radial peaking.

use ndarray::Array3;
use serde::Serialize;

use crate::constants::{AXIAL_SECTIONS, W};
use crate::geometry::ColumnType;
use crate::groups::{CENTER_SOURCES, OUTER_SOURCES};

/// A snapshot of the telemetry aggregator's last published values, suitable
/// for structured logging at the console driver's telemetry tick.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetrySnapshot {
    pub total_flux: f64,
    pub period: f64,
    pub radial_peak: f64,
    pub telemetry_time: f64,
    pub scrammed: bool,
}

/// Sum of flux at every FC_CPS column, across all axial slices.
pub fn total_flux(columns: &[[ColumnType; W]; W], flux: &Array3<f64>) -> f64 {
    let mut total = 0.0;
    for i in 0..W {
        for j in 0..W {
            if columns[i][j] == ColumnType::FcCps {
                for k in 0..AXIAL_SECTIONS {
                    total += flux[[i, j, k]];
                }
            }
        }
    }
    total
}

/// Ratio of outer-monitor-normalized flux to center-monitor-normalized flux.
pub fn radial_peak(flux: &Array3<f64>) -> f64 {
    let mut center_sum = 0.0;
    let mut outer_sum = 0.0;
    for k in 0..AXIAL_SECTIONS {
        for &(x, y) in &CENTER_SOURCES {
            center_sum += flux[[x, y, k]];
        }
        for &(x, y) in &OUTER_SOURCES {
            outer_sum += flux[[x, y, k]];
        }
    }
    if outer_sum == 0.0 || center_sum == 0.0 {
        return 0.0;
    }
    (OUTER_SOURCES.len() as f64 * center_sum) / (CENTER_SOURCES.len() as f64 * outer_sum)
}

/// Reactor period from the ratio of successive totals over the elapsed
/// telemetry interval. Guards the two numerically-undefined cases (no prior
/// total, or a non-positive multiplication ratio) by returning `0` rather
/// than propagating NaN (spec.md §9).
pub fn period(total_flux: f64, previous_flux: f64, telemetry_time: f64) -> f64 {
    if previous_flux == 0.0 {
        return 0.0;
    }
    let r = total_flux / previous_flux;
    if r <= 0.0 {
        return 0.0;
    }
    let change_per_second = r.powf(1.0 / telemetry_time);
    1.0 / change_per_second.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_is_zero_with_no_prior_total() {
        assert_eq!(period(10.0, 0.0, 0.5), 0.0);
    }

    #[test]
    fn period_is_zero_for_non_positive_ratio() {
        assert_eq!(period(-5.0, 10.0, 0.5), 0.0);
        assert_eq!(period(0.0, 10.0, 0.5), 0.0);
    }

    #[test]
    fn period_is_positive_for_growing_flux() {
        let p = period(20.0, 10.0, 0.5);
        assert!(p.is_finite());
        assert!(p > 0.0);
    }

    #[test]
    fn radial_peak_is_zero_with_no_flux() {
        let flux = Array3::<f64>::zeros((W, W, AXIAL_SECTIONS));
        assert_eq!(radial_peak(&flux), 0.0);
    }
}
