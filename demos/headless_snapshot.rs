use magic_circle::api::{CircleStudio, ControlValues, StudioConfig};
use magic_circle::core::Viewport;
use magic_circle::render::RecordingSurface;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = magic_circle::telemetry::init_default_tracing();

    let config = StudioConfig::new(Viewport::new(600, 600)).with_seed(2024);
    let mut studio = CircleStudio::new(config)?.with_surface(RecordingSurface::default());

    let controls = ControlValues::default().with_structure(5, "polygon_6", "alchemy", 8);
    let stats = studio.regenerate(&controls)?;

    if let Some(definition) = studio.definition() {
        println!("summary: {:?}", definition.summary());
        println!("{}", definition.to_json_contract_v1_pretty()?);
    }
    println!(
        "surface calls: circles={} paths={} lines={} texts={}",
        stats.circles_drawn, stats.paths_drawn, stats.lines_drawn, stats.texts_drawn
    );

    Ok(())
}
