//! The reactor simulator: owns the column map, every rod, the neutron flux
//! field and the telemetry accumulator, and exposes the operations the
//! command surface and the console driver drive it through.

use ndarray::Array3;

use crate::constants::{AXIAL_SECTIONS, ROD_INSERT_SPEED, ROD_SCRAM_SPEED, TELEMETRY_DT, W};
use crate::geometry::{self, ColumnType};
use crate::groups::{CENTER_SOURCES, GROUPS, OUTER_SOURCES};
use crate::rod::{Rod, RodKind};
use crate::solver;
use crate::telemetry::{self, TelemetrySnapshot};

/// The reactor: one owning value per simulation, single-threaded
/// cooperative (spec.md §5) — no internal locking, no shared-memory
/// contract, `step` runs synchronously to completion.
pub struct Reactor {
    columns: [[ColumnType; W]; W],
    rods: [[Rod; W]; W],
    flux: Array3<f64>,
    flux_scratch: Array3<f64>,
    scrammed: bool,
    total_flux: f64,
    previous_flux: f64,
    period: f64,
    radial_peak: f64,
    telemetry_time: f64,
}

impl Default for Reactor {
    fn default() -> Self {
        Self::new()
    }
}

impl Reactor {
    /// Builds the lattice, populates every rod at its initial position, and
    /// starts with a zero neutron flux field.
    pub fn new() -> Self {
        let columns = geometry::build_columns();

        let mut rods = [[Rod::empty(); W]; W];
        for (x, y, kind) in geometry::expand_cps_rods() {
            rods[x][y] = Rod::new(kind);
        }
        // Fuel fill: every FC_CPS column in the interior window without a
        // CPS rod becomes a Fuel rod (spec.md §4.1).
        for i in 4..W - 4 {
            for j in 4..W - 4 {
                if columns[i][j] == ColumnType::FcCps && rods[i][j].kind == RodKind::None {
                    rods[i][j] = Rod::new(RodKind::Fuel);
                }
            }
        }

        let flux = Array3::<f64>::zeros((W, W, AXIAL_SECTIONS));
        let flux_scratch = flux.clone();

        Self {
            columns,
            rods,
            flux,
            flux_scratch,
            scrammed: false,
            total_flux: 0.0,
            previous_flux: 0.0,
            period: 0.0,
            radial_peak: 0.0,
            telemetry_time: 0.0,
        }
    }

    /// Advances the simulator by `dt` seconds: scram handling, then
    /// mechanics, then the sub-stepped diffusion solver, then telemetry
    /// accumulation (spec.md §5's ordering).
    pub fn step(&mut self, dt: f64) {
        if self.scrammed {
            self.unselect_all();
            for row in self.rods.iter_mut() {
                for rod in row.iter_mut() {
                    if matches!(rod.kind, RodKind::Manual | RodKind::Automatic) {
                        rod.target_z = rod.max_z;
                        rod.pos_z = (rod.pos_z + dt * ROD_SCRAM_SPEED).clamp(rod.min_z, rod.max_z);
                    }
                }
            }
        }

        for row in self.rods.iter_mut() {
            for rod in row.iter_mut() {
                if rod.pos_z > rod.target_z {
                    rod.pos_z = (rod.pos_z - ROD_INSERT_SPEED * dt).max(rod.target_z);
                } else {
                    rod.pos_z = (rod.pos_z + ROD_INSERT_SPEED * dt).min(rod.target_z);
                }
            }
        }

        solver::step(
            &mut self.flux,
            &mut self.flux_scratch,
            &self.columns,
            &self.rods,
            dt,
        );

        self.telemetry_time += dt;
        if self.telemetry_time >= TELEMETRY_DT {
            self.total_flux = telemetry::total_flux(&self.columns, &self.flux);
            self.radial_peak = telemetry::radial_peak(&self.flux);
            self.period = telemetry::period(self.total_flux, self.previous_flux, self.telemetry_time);
            self.previous_flux = self.total_flux;
            self.telemetry_time = 0.0;
        }
    }

    /// Clears every rod's selection flag and, for every non-Automatic rod,
    /// snaps `target_z` back to the current `pos_z` (spec.md §4.3).
    fn unselect_all(&mut self) {
        for row in self.rods.iter_mut() {
            for rod in row.iter_mut() {
                rod.selected = false;
                if rod.kind != RodKind::Automatic {
                    rod.target_z = rod.pos_z;
                }
            }
        }
    }

    /// Selects the single rod at `(x, y)`, provided it's Manual or Short.
    /// Silently accepted as a no-op while `scrammed` (spec.md §9's
    /// preserved design choice). Out-of-range coordinates or a
    /// non-selectable rod at an in-range coordinate are rejected — but note
    /// that, matching the original, an in-range rejection still clears any
    /// prior selection (only the out-of-range case leaves it untouched).
    pub fn select_rod(&mut self, x: i64, y: i64) -> bool {
        if self.scrammed {
            return true;
        }
        if x < 0 || x >= W as i64 || y < 0 || y >= W as i64 {
            return false;
        }
        self.unselect_all();
        let rod = &mut self.rods[x as usize][y as usize];
        if rod.is_selectable() {
            rod.target_z = rod.pos_z;
            rod.selected = true;
            true
        } else {
            false
        }
    }

    /// Selects every Manual and Short rod. No-op while scrammed.
    pub fn select_all(&mut self) {
        if self.scrammed {
            return;
        }
        self.unselect_all();
        for row in self.rods.iter_mut() {
            for rod in row.iter_mut() {
                if rod.is_selectable() {
                    rod.selected = true;
                }
            }
        }
    }

    /// Selects every rod in 1-based group `g`, shifted by `(+3, +3)` to
    /// match the rod grid's origin. Returns `false` for an out-of-range
    /// group; a no-op-accepted `true` while scrammed.
    pub fn select_group(&mut self, g: i64) -> bool {
        if self.scrammed {
            return true;
        }
        if g < 1 || g as usize > GROUPS.len() {
            return false;
        }
        self.unselect_all();
        for &(i, j) in GROUPS[(g - 1) as usize] {
            self.rods[i + 3][j + 3].selected = true;
        }
        true
    }

    /// Selects the union of the center and outer source monitor sets.
    pub fn select_sources(&mut self) {
        if self.scrammed {
            return;
        }
        self.unselect_all();
        for &(x, y) in CENTER_SOURCES.iter().chain(OUTER_SOURCES.iter()) {
            self.rods[x][y].selected = true;
        }
    }

    /// Sets `target_z` for every selected rod to `pos_z + sign*dp`, clamped
    /// to its travel limits. `dp == 0` stops all selected rods.
    pub fn move_rod(&mut self, dp: f64) {
        for row in self.rods.iter_mut() {
            for rod in row.iter_mut() {
                if rod.selected {
                    rod.target_z =
                        (rod.pos_z + rod.direction_sign() * dp).clamp(rod.min_z, rod.max_z);
                }
            }
        }
    }

    /// Initiates an emergency scram: `step` will drive every Manual and
    /// Automatic rod to `max_z` at `rod_scram_speed`.
    pub fn scram(&mut self) {
        self.scrammed = true;
    }

    /// Clears the scram flag, returning rod control to the command surface.
    pub fn scram_reset(&mut self) {
        self.scrammed = false;
    }

    pub fn scrammed(&self) -> bool {
        self.scrammed
    }

    pub fn neutron_flux(&self) -> f64 {
        self.total_flux
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn radial_peak(&self) -> f64 {
        self.radial_peak
    }

    pub fn telemetry_snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            total_flux: self.total_flux,
            period: self.period,
            radial_peak: self.radial_peak,
            telemetry_time: self.telemetry_time,
            scrammed: self.scrammed,
        }
    }

    pub fn rods(&self) -> &[[Rod; W]; W] {
        &self.rods
    }

    pub fn columns(&self) -> &[[ColumnType; W]; W] {
        &self.columns
    }
}
