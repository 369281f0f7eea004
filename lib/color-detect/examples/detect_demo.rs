use color_detect::DetectionConfig;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tmp/hue_sweep.png"));

    let result = DetectionConfig::new().detect_file(&path)?;
    println!("{}", serde_json::to_string_pretty(&result.report())?);

    Ok(())
}
