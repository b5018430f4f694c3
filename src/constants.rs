//! Bit-exact geometry tables and physical constants.
//!
//! Values and layouts are reproduced from the original `reactor.cpp` so the
//! column map and rod population are byte-for-byte identical to the source
//! this simulator was modeled on.

/// Side length of the square column/rod grid.
pub const W: usize = 56;

/// Number of axial slices the neutron flux field is divided into.
pub const AXIAL_SECTIONS: usize = 32;

/// Width of a single graphite stack section, in meters.
pub const GRAPHITE_WIDTH: f64 = 0.25;

/// Active reactor height, `AXIAL_SECTIONS * GRAPHITE_WIDTH`.
pub const REACTOR_HEIGHT: f64 = AXIAL_SECTIONS as f64 * GRAPHITE_WIDTH;

pub const GRAPHITE_HOLES_DIAMETER: f64 = 0.114;
pub const PRESSURE_TUBE_INNER_DIAMETER: f64 = 0.08;
pub const ROD_DIAMETER: f64 = 0.06;

pub const ABSORBER_LENGTH: f64 = 5.12;
pub const SHORT_ABSORBER_LENGTH: f64 = 3.05;
pub const SOURCE_LENGTH: f64 = 7.0;

pub const ROD_INSERT_SPEED: f64 = 0.4;
pub const ROD_SCRAM_SPEED: f64 = 0.4;

pub const SOURCE_STRENGTH: f64 = 1e-10;
pub const ENRICHMENT: f64 = 2e-2;
pub const U235_NEUTRONS: f64 = 2.43;

/// Macroscopic cross sections, m^-1.
pub const GRAPHITE_ABS_MCS: f64 = 2.26e-2;
pub const B4C_ABS_MCS: f64 = 8.43e3;
pub const U235_FISSION_MCS: f64 = 1.425e3;
pub const U235_ABS_MCS: f64 = 2.421e2;
pub const U238_ABS_MCS: f64 = 4.89;
pub const WATER_ABS_MCS: f64 = 1.338;

/// Volume of uranium fuel in a section, m^3 (empirical constant, not derived
/// from the other geometric constants).
pub const U_VOLUME: f64 = 3.734e-4;

/// Per-cell material volumes, derived from the geometric constants above.
pub const RR_GRAPHITE_VOLUME: f64 = GRAPHITE_WIDTH * GRAPHITE_WIDTH * GRAPHITE_WIDTH;
pub const RRC_COOLANT_VOLUME: f64 = GRAPHITE_WIDTH * std::f64::consts::PI
    * PRESSURE_TUBE_INNER_DIAMETER
    * PRESSURE_TUBE_INNER_DIAMETER
    / 4.0;
pub const GRAPHITE_VOLUME: f64 = (GRAPHITE_WIDTH * GRAPHITE_WIDTH
    - std::f64::consts::PI * GRAPHITE_HOLES_DIAMETER * GRAPHITE_HOLES_DIAMETER / 4.0)
    * GRAPHITE_WIDTH;
pub const B4C_VOLUME: f64 =
    GRAPHITE_WIDTH * std::f64::consts::PI * ROD_DIAMETER * ROD_DIAMETER / 4.0;
pub const COOLANT_VOLUME: f64 = GRAPHITE_WIDTH * std::f64::consts::PI
    * (PRESSURE_TUBE_INNER_DIAMETER * PRESSURE_TUBE_INNER_DIAMETER
        - ROD_DIAMETER * ROD_DIAMETER)
    / 4.0;

/// Prompt-neutron-generation time, the solver's sub-step, seconds.
pub const PROMPT_GEN_TIME: f64 = 0.002;

/// Telemetry aggregation period, seconds.
pub const TELEMETRY_DT: f64 = 0.5;

/// Real-time pacing step the driver is expected to use, seconds.
pub const DEFAULT_DT: f64 = 0.025;

/// Column-annulus table: 11 rows of two packed 32-bit words, 2-bit symbols
/// per cell (0=None, 1=RRC, 2=RR, 3=FC_CPS), most-significant pair first.
pub const COLUMN_LAYOUT: [u32; 22] = [
    0xFFFFFFFF, 0xEA000000, 0xFFFFFFFF, 0xAA000000, 0xFFFFFFFE, 0xA9000000, 0xFFFFFFFA,
    0xA4000000, 0xFFFFFFAA, 0x90000000, 0xFFFFFAAA, 0x40000000, 0xFFFEAAA5, 0x00000000,
    0xAAAAAA50, 0x00000000, 0xAAAAA500, 0x00000000, 0xAA955000, 0x00000000, 0x55400000,
    0x00000000,
];

/// CPS table: 17 rows of 9 octal (3-bit) symbols (0=None, 1=Manual, 2=Short,
/// 3=Automatic, 4=Source) describing one 45-degree sector of the core.
pub const CPS_LAYOUT: [u32; 17] = [
    0o112000000,
    0o111110000,
    0o214121000,
    0o111111100,
    0o312111210,
    0o111311110,
    0o214121412,
    0o131111111,
    0o112131211,
    0o131111111,
    0o214121412,
    0o111311110,
    0o312111210,
    0o111111100,
    0o214121000,
    0o111110000,
    0o112100000,
];
