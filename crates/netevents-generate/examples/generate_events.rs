use std::env;
use std::path::PathBuf;

use netevents_generate::{GenerateOptions, GenerationEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut count: Option<u64> = None;
    let mut out: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = args.next().map(|value| value.parse()).transpose()?,
            "--out" => out = args.next().map(PathBuf::from),
            _ => {
                if count.is_none() {
                    count = Some(arg.parse()?);
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let count = count.ok_or("missing event count")?;
    let out = out.unwrap_or_else(|| PathBuf::from("events.json"));

    let options = GenerateOptions {
        seed,
        ..GenerateOptions::default()
    };
    let engine = GenerationEngine::new(options)?;
    let report = engine.run(count, &out)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
