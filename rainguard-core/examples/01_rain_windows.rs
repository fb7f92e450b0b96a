//! Rain Window Example
//!
//! Feeds a short, hand-written day of rain-gauge counter readings into a
//! `RainGauge` and prints the hourly and daily totals as the clock moves.
//!
//! ## What You'll Learn
//!
//! - Driving a history with an injected clock
//! - How counter resets are folded into the total
//! - Validating window configuration before use
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_rain_windows
//! ```

use rainguard_core::{FixedClock, GaugeConfig, RainGauge};

fn main() {
    println!("RainGuard Rain Window Example");
    println!("=============================\n");

    let config = GaugeConfig::default();
    if let Err(e) = config.validate() {
        eprintln!("bad configuration: {e}");
        return;
    }

    let t0 = 1_700_000_000;
    let mut gauge = RainGauge::from_config(&config, FixedClock::new(t0));

    // (minutes after t0, counter value in mm)
    let readings = [
        (0, 120.3),
        (20, 120.6),
        (40, 121.5),
        (60, 122.1),
        (80, 0.2), // station rebooted, counter restarted
        (100, 0.8),
        (180, 0.8), // dry
        (240, 1.4),
    ];

    println!("{:>7} {:>9} {:>10} {:>10}", "minute", "counter", "last hour", "last 24h");
    for (minute, counter) in readings {
        let ts = t0 + minute * 60;
        gauge.clock_mut().set(ts);
        let stored = gauge.record(counter, ts);

        println!(
            "{:>7} {:>9.1} {:>10.2} {:>10.2}{}",
            minute,
            counter,
            gauge.rain_last_hour(),
            gauge.rain_last_24h(),
            if stored { "" } else { "  (repeat, not stored)" }
        );
    }

    println!("\nDaily window holds {} samples", gauge.daily().len());
}
