//! Rod population: the kind tag plus the per-kind mechanical limits.
//!
//! A single `Rod` record represents every cell of the grid, selectable by
//! `kind`. There is no subclass hierarchy; per-kind behavior (limits,
//! direction, reaction contribution) is a pure function of `kind`.

use crate::constants::{ABSORBER_LENGTH, REACTOR_HEIGHT, SHORT_ABSORBER_LENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RodKind {
    /// No rod occupies this cell.
    None,
    Manual,
    Short,
    Automatic,
    Source,
    Fuel,
}

/// Mechanical state of one grid cell's rod (or lack of one).
#[derive(Debug, Clone, Copy)]
pub struct Rod {
    pub kind: RodKind,
    pub min_z: f64,
    pub max_z: f64,
    /// `true` when the rod enters the core from above.
    pub direction: bool,
    pub pos_z: f64,
    pub target_z: f64,
    pub selected: bool,
}

impl Rod {
    /// An empty cell: no rod, all fields at their inert defaults.
    pub fn empty() -> Self {
        Self {
            kind: RodKind::None,
            min_z: 0.0,
            max_z: 0.0,
            direction: true,
            pos_z: 0.0,
            target_z: 0.0,
            selected: false,
        }
    }

    /// Construct a rod of `kind` at its initial position, per the per-kind
    /// limits table (spec.md §3).
    pub fn new(kind: RodKind) -> Self {
        let (min_z, max_z, direction, pos_z) = match kind {
            RodKind::None => (0.0, 0.0, true, 0.0),
            RodKind::Manual | RodKind::Automatic => {
                let min_z = -ABSORBER_LENGTH + 0.5;
                let max_z = 0.5;
                (min_z, max_z, true, max_z)
            }
            RodKind::Short => {
                let min_z = REACTOR_HEIGHT - SHORT_ABSORBER_LENGTH - 0.5;
                let max_z = REACTOR_HEIGHT - 0.5;
                (min_z, max_z, false, min_z)
            }
            RodKind::Source => {
                let min_z = -7.0;
                let max_z = 0.5;
                (min_z, max_z, true, min_z)
            }
            RodKind::Fuel => (0.0, 0.0, true, 0.0),
        };
        Self {
            kind,
            min_z,
            max_z,
            direction,
            pos_z,
            target_z: pos_z,
            selected: false,
        }
    }

    /// Whether this rod can be the target of `select_rod`/`select_all`.
    pub fn is_selectable(&self) -> bool {
        matches!(self.kind, RodKind::Manual | RodKind::Short)
    }

    /// +1 if the rod enters from above, -1 if from below — the sign applied
    /// to a commanded `move_rod(dp)` displacement.
    pub fn direction_sign(&self) -> f64 {
        if self.direction {
            1.0
        } else {
            -1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_rod_starts_withdrawn() {
        let r = Rod::new(RodKind::Manual);
        assert_eq!(r.pos_z, r.max_z);
        assert_eq!(r.target_z, r.pos_z);
        assert!(r.direction);
    }

    #[test]
    fn short_rod_starts_inserted_from_below() {
        let r = Rod::new(RodKind::Short);
        assert_eq!(r.pos_z, r.min_z);
        assert!(!r.direction);
        assert!(r.min_z < r.max_z);
    }

    #[test]
    fn source_rod_limits() {
        let r = Rod::new(RodKind::Source);
        assert_eq!(r.min_z, -7.0);
        assert_eq!(r.max_z, 0.5);
        assert_eq!(r.pos_z, r.min_z);
    }

    #[test]
    fn fuel_rod_has_no_axial_extent() {
        let r = Rod::new(RodKind::Fuel);
        assert_eq!(r.min_z, 0.0);
        assert_eq!(r.max_z, 0.0);
        assert_eq!(r.pos_z, 0.0);
    }

    #[test]
    fn only_manual_and_short_are_selectable() {
        assert!(Rod::new(RodKind::Manual).is_selectable());
        assert!(Rod::new(RodKind::Short).is_selectable());
        assert!(!Rod::new(RodKind::Automatic).is_selectable());
        assert!(!Rod::new(RodKind::Source).is_selectable());
        assert!(!Rod::new(RodKind::Fuel).is_selectable());
    }
}
