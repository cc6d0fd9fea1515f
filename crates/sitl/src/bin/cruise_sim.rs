//! Scripted demo run of the speed controller.
//!
//! Accelerates from standstill, engages adaptive mode, drives through a
//! hazard window, and lets the controller restore the captured target.
//!
//! Usage: cargo run -p cruisectl-sitl --bin cruise_sim [config.toml]

use cruisectl_core::ControlRequests;
use cruisectl_sitl::{
    InputScript, RangeSegment, ScriptedRange, ScriptedRangeConfig, SimConfig, SimError,
    SimHarness,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(std::path::Path::new(&path))?,
        None => SimConfig::default(),
    };

    // Hold accel for 3 s, engage adaptive at 3.5 s, cancel at 9.5 s
    let script = InputScript::new()
        .hold(0, 3_000_000, ControlRequests::ACCEL)
        .press(3_500_000, ControlRequests::SET_ADAPTIVE)
        .press(9_500_000, ControlRequests::CANCEL);

    // Clear road, an obstacle between 5 s and 7 s, then clear again
    let range = ScriptedRange::new(
        vec![
            RangeSegment {
                from_us: 0,
                range_m: 2.0,
            },
            RangeSegment {
                from_us: 5_000_000,
                range_m: 0.2,
            },
            RangeSegment {
                from_us: 7_000_000,
                range_m: 1.5,
            },
        ],
        ScriptedRangeConfig {
            noise_m: 0.01,
            seed: Some(42),
        },
    )?;

    let mut sim = SimHarness::new(&config, script, Box::new(range))?;
    sim.run_for(10_000_000).await?;

    for record in sim.records() {
        println!("{}", record.display_line());
    }

    let final_state = sim.telemetry();
    println!(
        "final: mode={} speed={}",
        final_state.mode.name(),
        final_state.speed
    );
    Ok(())
}
