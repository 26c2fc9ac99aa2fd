//! Model Export Tool
//!
//! Converts a JSON weight dump from the training pipeline into the binary
//! artifact the server loads at startup:
//!
//! ```text
//! export-model trained.json pothole_model.bin
//! ```
//!
//! Input format: `{ "weights": [f64, ...], "bias": f64 }`.

use classifier::LinearModel;
use serde::Deserialize;
use std::process::ExitCode;

#[derive(Debug, Deserialize)]
struct TrainedParams {
    weights: Vec<f64>,
    bias: f64,
}

fn run(input: &str, output: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(input)?;
    let params: TrainedParams = serde_json::from_str(&json)?;

    if params.weights.is_empty() {
        return Err("weight vector is empty".into());
    }

    let model = LinearModel::from_parts(params.weights, params.bias);
    model.save(output)?;

    println!(
        "wrote {} ({} features + bias, {} bytes)",
        output,
        model.dimension(),
        (model.dimension() + 1) * 4
    );
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: export-model <trained.json> <model.bin>");
        return ExitCode::FAILURE;
    }

    match run(&args[1], &args[2]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("export failed: {e}");
            ExitCode::FAILURE
        }
    }
}
