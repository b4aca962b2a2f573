use fractal_viewport::{ExplorerConfig, default_tour, run_scripted_session};
use std::time::Duration;

const FRAME_TIMEOUT: Duration = Duration::from_secs(30);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let config = ExplorerConfig::default();
    let summary = run_scripted_session(
        &config,
        &default_tour(&config),
        "output/explorer.ppm",
        FRAME_TIMEOUT,
    )?;

    println!(
        "composited {} frames, final view ({:.6}, {:.6}) at zoom {:.3}",
        summary.frames_composited.len(),
        summary.viewport.center_x(),
        summary.viewport.center_y(),
        summary.viewport.zoom()
    );

    Ok(())
}
