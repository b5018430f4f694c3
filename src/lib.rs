//! RBMK-style channel reactor physics core.
//!
//! Deterministic lattice geometry, rod mechanics and a 3-D neutron flux
//! diffusion solver, advanced one fixed-`dt` tick at a time via
//! [`Reactor::step`]. No I/O, no threads, no persisted state — the
//! terminal dashboard and command REPL that drive this live in the
//! `rbmk-console` crate.

pub mod command;
pub mod constants;
pub mod geometry;
pub mod groups;
pub mod reactor;
pub mod rod;
pub mod solver;
pub mod telemetry;

pub use command::{apply as apply_command, parse_command, Command, CommandError};
pub use constants::{AXIAL_SECTIONS, W};
pub use geometry::ColumnType;
pub use reactor::Reactor;
pub use rod::{Rod, RodKind};
pub use telemetry::TelemetrySnapshot;
