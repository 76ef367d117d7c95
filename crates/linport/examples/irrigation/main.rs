//! Irrigation time prediction with a generated model.
//!
//! `model.rs` was produced by:
//!
//! ```text
//! linport-export --model tests/test-cases/upstream/irrigation.json \
//!     --name IrrigationModel --out examples/irrigation/model.rs
//! ```
//!
//! Run with: cargo run --example irrigation

mod model;

use std::f32::consts::PI;

use linport::export::{render, ExportConfig, ModelDescriptor, Target, TrainedModel};

/// One sensor reading, as the firmware sees it.
struct Reading {
    temperature: f32,
    humidity: f32,
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
}

impl Reading {
    /// Feature vector in training order.
    fn features(&self) -> [f32; model::N_FEATURES] {
        let cyclic = |value: u8, period: f32| {
            let angle = 2.0 * PI * value as f32 / period;
            (angle.sin(), angle.cos())
        };
        let (dia_sin, dia_cos) = cyclic(self.day, 31.0);
        let (mes_sin, mes_cos) = cyclic(self.month, 12.0);
        let (hora_sin, hora_cos) = cyclic(self.hour, 24.0);
        [
            self.temperature,
            self.humidity,
            self.year as f32,
            dia_sin,
            dia_cos,
            mes_sin,
            mes_cos,
            hora_sin,
            hora_cos,
        ]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let reading = Reading { temperature: 13.8, humidity: 64.2, year: 2025, month: 5, day: 16, hour: 3 };
    let x = reading.features();
    println!("predicted irrigation time: {:.2} minutes", model::predict(&x));

    // The generated static and the export it came from agree bit for bit
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/test-cases/upstream/irrigation.json");
    let descriptor = ModelDescriptor::from_trained(&TrainedModel::from_path(path)?)?;
    assert_eq!(descriptor.to_fixed::<{ model::N_FEATURES }>()?, model::IRRIGATION_MODEL);
    assert_eq!(descriptor.predict(&x)?.to_bits(), model::predict(&x).to_bits());

    // Same model as an Arduino header
    let config = ExportConfig::builder()
        .target(Target::Arduino)
        .name("IrrigationModel")
        .build()?;
    print!("{}", render(&descriptor, &config));
    Ok(())
}
