//! Minimal text dashboard: plain ANSI clear-and-redraw, no external TUI
//! crate. The spec leaves the dashboard's presentation unspecified beyond
//! "a text/ANSI dashboard", so this renders the handful of numbers an
//! operator actually watches plus the last command's outcome.

use rbmk_reactor::{Reactor, RodKind};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub fn render(reactor: &Reactor, last_error: Option<&str>) {
    let snapshot = reactor.telemetry_snapshot();

    let mut manual_withdrawn = 0usize;
    let mut manual_total = 0usize;
    for row in reactor.rods() {
        for rod in row {
            if rod.kind == RodKind::Manual {
                manual_total += 1;
                let travel = rod.max_z - rod.min_z;
                if travel > 0.0 && (rod.pos_z - rod.min_z) / travel > 0.5 {
                    manual_withdrawn += 1;
                }
            }
        }
    }

    print!("{CLEAR_SCREEN}");
    println!("RBMK reactor console");
    println!("--------------------");
    println!("scrammed     : {}", snapshot.scrammed);
    println!("total flux   : {:.6e}", snapshot.total_flux);
    println!("period (s)   : {:.3}", snapshot.period);
    println!("radial peak  : {:.3}", snapshot.radial_peak);
    println!("manual rods  : {manual_withdrawn}/{manual_total} > 50% withdrawn");
    if let Some(err) = last_error {
        println!("last error   : {err}");
    }
    println!();
    println!("> ");
}
