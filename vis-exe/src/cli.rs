use argh::FromArgs;
use level::log;

/// CLI options for the visibility demo
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug, trace
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// viewport width in pixels
    #[argh(option, default = "0")]
    pub width: u32,
    /// viewport height in pixels
    #[argh(option, default = "0")]
    pub height: u32,
    /// vertical field of view in degrees
    #[argh(option)]
    pub fov: Option<f32>,
    /// how many traversals to run, for profiling
    #[argh(option, default = "1")]
    pub frames: usize,
    /// skip the z clip planes (depth-clamp rendering)
    #[argh(option, default = "false")]
    pub depth_clamp: bool,
}
