//! User configuration options.

use crate::cli::CLIOptions;
use dirs::config_dir;
use level::log::{error, info, warn};
use nanoserde::{DeRon, SerRon};
use std::fs::{create_dir, File, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

const LOG_TAG: &str = "UserConfig";
const BASE_DIR: &str = "spanvis/";

fn get_cfg_file() -> PathBuf {
    let mut dir =
        config_dir().unwrap_or_else(|| panic!("{}: Couldn't open user config dir", LOG_TAG));
    dir.push(BASE_DIR);
    if !dir.exists() {
        create_dir(&dir)
            .unwrap_or_else(|e| panic!("{}: Couldn't create {:?}: {}", LOG_TAG, dir, e));
    }
    dir.push("user.ron");
    dir
}

#[derive(Debug, Clone, DeRon, SerRon)]
pub struct UserConfig {
    pub width: u32,
    pub height: u32,
    pub fov: f32,
    pub depth_clamp: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
            fov: 90.0,
            depth_clamp: false,
        }
    }
}

impl UserConfig {
    /// `load` will attempt to read the config, and panic if errored
    pub fn load() -> Self {
        let path = get_cfg_file();

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.clone())
            .unwrap_or_else(|e| panic!("Couldn't open {:?}, {}", path, e));
        let mut buf = String::new();
        if let Ok(read_len) = file.read_to_string(&mut buf) {
            if read_len == 0 {
                return UserConfig::create_default(&mut file);
            } else {
                if let Ok(data) = UserConfig::deserialize_ron(&buf) {
                    info!(target: LOG_TAG, "Loaded user config file");
                    return data;
                }
                warn!("Could not deserialise {:?}, recreating config", path);
            }
        }
        UserConfig::create_default(&mut file)
    }

    fn create_default(file: &mut File) -> Self {
        let config = UserConfig::default();
        let data = config.serialize_ron();
        file.write_all(data.as_bytes())
            .unwrap_or_else(|_| panic!("Could not write {:?}", get_cfg_file()));
        info!("Created default user config file");
        config
    }

    pub fn write(&self) {
        let mut file = File::create(get_cfg_file()).expect("Couldn't overwrite config");
        let data = self.serialize_ron();
        file.write_all(data.as_bytes())
            .unwrap_or_else(|err| error!("Could not write config: {}", err));
    }

    /// Sync the CLI options and UserConfig with each other
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!("Checking CLI options");

        if cli.width != 0 && cli.width != self.width {
            self.width = cli.width;
        } else {
            cli.width = self.width;
        }

        if cli.height != 0 && cli.height != self.height {
            self.height = cli.height;
        } else {
            cli.height = self.height;
        }

        if let Some(fov) = cli.fov {
            if fov != self.fov {
                self.fov = fov;
            }
        } else {
            cli.fov = Some(self.fov);
        }

        if cli.depth_clamp != self.depth_clamp {
            self.depth_clamp = cli.depth_clamp;
        }
    }
}
