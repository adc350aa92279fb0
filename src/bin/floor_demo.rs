//! Analyze a typical two-bay steel floor and print a result summary.
//!
//! Run with `RUST_LOG=debug` to watch the pipeline stages.

use deckframe::prelude::*;

fn main() -> FrameResult<()> {
    env_logger::init();

    // 18 m x 12 m floor, 6 m column grid, main beams along X,
    // secondary beams at 2 m centres, 5 kPa floor pressure
    let layout = FloorLayout::new(18.0, 12.0, 3.5, 6.0, 6.0, BeamDirection::X, 2.0);
    let framing = FloorFraming::new(
        Material::steel(),
        // UC 203x203x46 / UB 305x165x40 / UB 203x133x25 (approximate)
        Section::wide_flange(0.2032, 0.2034, 0.0110, 0.0072),
        Section::wide_flange(0.3034, 0.1654, 0.0102, 0.0060),
        Section::wide_flange(0.2032, 0.1332, 0.0078, 0.0057),
    );
    let area_load = 5.0e3;

    let mut model = build_floor_model(&layout, &framing, area_load)?;
    println!(
        "floor model: {} nodes, {} members",
        model.nodes.len(),
        model.members.len()
    );

    let options = AnalysisOptions::default()
        .with_deflection_limit(layout.column_spacing_y / 360.0)
        .with_statics_check();
    let results = model.analyze(&options)?;

    println!(
        "\nmax deflection: {:.2} mm at node {} (limit {:.2} mm, {})",
        results.max_deflection.value * 1000.0,
        results.max_deflection.node,
        options.deflection_limit.unwrap_or(0.0) * 1000.0,
        match results.max_deflection.within_limit() {
            Some(true) => "OK",
            Some(false) => "EXCEEDED",
            None => "no limit",
        }
    );

    println!("\ncolumn base reactions:");
    for (name, reaction) in &results.reactions {
        println!(
            "  {:10} Fz = {:9.1} N   My = {:9.1} N·m",
            name, reaction.fz, reaction.my
        );
    }

    println!("\ngoverning beam moments:");
    let mut worst: Vec<(&String, f64)> = results
        .member_forces
        .iter()
        .map(|(name, diagram)| (name, diagram.max_moment()))
        .collect();
    worst.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (name, moment) in worst.iter().take(5) {
        println!("  {:14} |M|max = {:9.1} N·m", name, moment);
    }

    Ok(())
}
