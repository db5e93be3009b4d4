#![doc = include_str!("../../README.md")]

mod cli;
mod config;
mod scene;

use cli::CLIOptions;
use config::UserConfig;
use level::glam::Vec3;
use level::log::{self, info};
use mimalloc::MiMalloc;
use render_vis::{Camera, VisTraversal};
use simplelog::TermLogger;
use std::error::Error;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut user_config = UserConfig::load();
    user_config.sync_cli(&mut options);
    user_config.write();

    let level = scene::two_room_level()?;

    let fov = options.fov.unwrap_or(90.0).to_radians();
    let mut camera = Camera::new(
        Vec3::ZERO,
        Vec3::X,
        fov,
        options.width as usize,
        options.height as usize,
    );
    camera.depth_clamp = options.depth_clamp;

    let mut vis = VisTraversal::new();
    for _ in 0..options.frames.max(1) {
        vis.run(&level, &camera);
    }

    info!("opaque surfaces, front to back: {:?}", vis.opaque());
    info!("translucent surfaces: {:?}", vis.translucent());
    info!("potentially visible actors: {:?}", vis.visible_actors());
    info!("reachable zone mask: {:#b}", vis.zone_mask());
    let counters = vis.counters();
    info!(
        "checked {} nodes, {} surfaces, {} triangles; drew {} spans",
        counters.nodes_visited,
        counters.surfs_checked,
        counters.tris_checked,
        counters.spans_drawn
    );

    #[cfg(feature = "hprof")]
    coarse_prof::write(&mut std::io::stdout())?;

    Ok(())
}
