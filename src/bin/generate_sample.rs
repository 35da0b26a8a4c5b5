use anyhow::{Context, Result};

/// Load (N) at displacement `d` (mm): linear elastic up to the yield load,
/// then linear hardening, then necking.
fn load_at(d: f64) -> f64 {
    const STIFFNESS: f64 = 2500.0;
    const YIELD_LOAD: f64 = 1800.0;
    const HARDENING: f64 = 90.0; // N/mm past yield
    const NECK_START: f64 = 4.0;

    let yield_disp = YIELD_LOAD / STIFFNESS;
    let load = if d <= yield_disp {
        STIFFNESS * d
    } else {
        YIELD_LOAD + HARDENING * (d - yield_disp)
    };
    if d > NECK_START {
        load * (1.0 - 0.4 * (d - NECK_START))
    } else {
        load
    }
}

/// Deterministic measurement noise from a SplitMix64 sequence.
struct Jitter {
    state: u64,
}

impl Jitter {
    fn new(seed: u64) -> Self {
        Jitter { state: seed }
    }

    fn next_bits(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[-amplitude, amplitude)`.
    fn sample(&mut self, amplitude: f64) -> f64 {
        let unit = (self.next_bits() >> 11) as f64 / (1u64 << 53) as f64;
        (2.0 * unit - 1.0) * amplitude
    }
}

fn main() -> Result<()> {
    const AREA: f64 = 20.0; // mm²
    const GAUGE_LENGTH: f64 = 50.0; // mm
    const STEP: f64 = 0.005; // mm
    const END: f64 = 5.5; // mm

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "100-001.Dat".to_string());
    let mut jitter = Jitter::new(42);

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    // four header lines, matching the default reader layout
    writer.write_record(["Synthetic tensile test", "100-001"])?;
    writer.write_record(["Area (mm^2)", AREA.to_string().as_str()])?;
    writer.write_record(["Gauge length (mm)", GAUGE_LENGTH.to_string().as_str()])?;
    writer.write_record(["Load (N)", "Displacement (mm)", "Stress (MPa)", "Time (s)", "Extension (%)", "Strain (%)"])?;

    let steps = (END / STEP).round() as usize;
    for i in 0..=steps {
        let d = i as f64 * STEP;
        let load = (load_at(d) + jitter.sample(2.0)).max(0.0);
        let stress = load / AREA;
        let strain = 100.0 * d / GAUGE_LENGTH;
        let time = d * 60.0;
        writer.write_record(&[
            format!("{load:.3}"),
            format!("{d:.4}"),
            format!("{stress:.4}"),
            format!("{time:.2}"),
            format!("{strain:.4}"),
            format!("{strain:.4}"),
        ])?;
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {} samples to {output_path}", steps + 1);
    Ok(())
}
