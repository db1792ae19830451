//! Train the abalone age model, then predict one sample specimen.

use abalone_age::data::Abalone;
use abalone_age::training::{self, TrainingConfig};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abalone_age=info".into()),
        )
        .init();

    let model = training::train(&TrainingConfig::default())?;

    let sample = Abalone {
        length: 0.524,       // mm
        diameter: 0.408,     // mm
        height: 0.140,       // mm
        whole_weight: 0.829, // grams
        shell_weight: 0.239, // grams
        ..Abalone::default()
    };
    let prediction = model.predict(&sample)?;

    println!("Predicted Age is {}", prediction.age.floor());

    Ok(())
}
