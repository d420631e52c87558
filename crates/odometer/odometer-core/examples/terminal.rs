//! Counts up on a single terminal line.
//!
//! cargo run -p odometer-core --example terminal -- 98765

use std::io::Write;
use std::thread;
use std::time::Duration;

use odometer_core::{Config, OdometerController, TextSurface};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let goal: String = std::env::args().nth(1).unwrap_or_else(|| "1234567".into());

    let cfg = Config::default();
    let mut odo = OdometerController::with_system_clock(TextSurface::for_config(&cfg), cfg)?;
    odo.set_target(0u64)?;
    odo.set_target(goal.as_str())?;

    let mut stdout = std::io::stdout();
    while odo.is_animating() {
        odo.tick();
        write!(stdout, "\r{}", odo.surface().line())?;
        stdout.flush()?;
        thread::sleep(Duration::from_millis(16));
    }
    writeln!(stdout, "\r{}", odo.surface().line())?;
    Ok(())
}
