// cli.rs - Command-line interface configuration
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::settings::ControllerSettings;

#[derive(Parser, Debug, Clone)]
#[command(name = "first-person-demo")]
#[command(about = "First-person camera controls demo", long_about = None)]
pub struct Cli {
    /// JSON file with controller settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override movement speed (units per second)
    #[arg(long)]
    pub movement_speed: Option<f32>,

    /// Override look speed (degrees per pixel)
    #[arg(long)]
    pub look_speed: Option<f32>,

    /// Do not lock the pointer while dragging
    #[arg(long = "no-capture", default_value = "false")]
    pub no_capture: bool,

    /// Keep the camera moving forward
    #[arg(long, default_value = "false")]
    pub auto_forward: bool,

    /// Restrict pitch to [vertical-min, vertical-max] radians
    #[arg(long, default_value = "false")]
    pub constrain_vertical: bool,

    #[arg(long, requires = "constrain_vertical")]
    pub vertical_min: Option<f32>,

    #[arg(long, requires = "constrain_vertical")]
    pub vertical_max: Option<f32>,
}

impl Cli {
    /// Settings file (or defaults) with command-line overrides applied
    pub fn settings(&self) -> Result<ControllerSettings> {
        let mut settings = match &self.config {
            Some(path) => ControllerSettings::load(path)?,
            None => ControllerSettings::default(),
        };

        if let Some(speed) = self.movement_speed {
            settings.movement_speed = speed;
        }
        if let Some(speed) = self.look_speed {
            settings.look_speed = speed;
        }
        if self.no_capture {
            settings.capture_mouse = false;
        }
        if self.auto_forward {
            settings.auto_forward = true;
        }
        if self.constrain_vertical {
            settings.constrain_vertical = true;
        }
        if let Some(min) = self.vertical_min {
            settings.vertical_min = min;
        }
        if let Some(max) = self.vertical_max {
            settings.vertical_max = max;
        }

        Ok(settings)
    }
}
