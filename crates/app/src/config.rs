//! Command-line configuration.
//!
//! `mesh-viewer <file.obj> [--keys=t,up,r,left] [--size=WxH] [--fov=DEG]`

use std::path::PathBuf;

use anyhow::{Result, bail};
use corelib::{Camera, Key};

pub const USAGE: &str = "usage: mesh-viewer <file.obj> [--keys=t,up,...] [--size=WxH] [--fov=DEG]";

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub obj_path: PathBuf,
    pub keys: Vec<Key>,
    pub width: u32,
    pub height: u32,
    pub fov_y_deg: f32,
}

impl ViewerConfig {
    /// Parse from arguments, program name already stripped.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let Some(obj_path) = args.iter().find(|a| !a.starts_with("--")) else {
            bail!("missing OBJ path\n{USAGE}");
        };
        let (width, height) = parse_size_args(args);
        Ok(Self {
            obj_path: PathBuf::from(obj_path),
            keys: parse_keys_arg(args),
            width,
            height,
            fov_y_deg: parse_fov_arg(args),
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

fn parse_keys_arg(args: &[String]) -> Vec<Key> {
    // --keys=t,up,up,r,left
    let mut keys = Vec::new();
    for arg in args {
        if let Some(list) = arg.strip_prefix("--keys=") {
            for name in list.split(',').filter(|s| !s.trim().is_empty()) {
                match name.parse::<Key>() {
                    Ok(key) => keys.push(key),
                    Err(e) => log::warn!("{e}, skipping"),
                }
            }
        }
    }
    keys
}

fn parse_fov_arg(args: &[String]) -> f32 {
    for arg in args {
        if let Some(val) = arg.strip_prefix("--fov=") {
            match val.parse::<f32>() {
                Ok(deg) if deg > 0.0 && deg < 180.0 => return deg,
                _ => log::warn!(
                    "Invalid fov '{}', falling back to {}.",
                    val,
                    Camera::DEFAULT_FOV_Y_DEG
                ),
            }
        }
    }
    Camera::DEFAULT_FOV_Y_DEG
}

fn parse_size_args(args: &[String]) -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in args {
        if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    w = Some(pw);
                    h = Some(ph);
                }
            }
        }
    }

    let ww = w.unwrap_or(800).max(1);
    let hh = h.unwrap_or(600).max(1);
    (ww, hh)
}
