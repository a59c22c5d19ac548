//! Viewer session: one loaded mesh, its transform and the input state that
//! drives it.

use std::str::FromStr;

use asset::Mesh;
use thiserror::Error;

use crate::{
    Mat4, Vec3,
    camera::Camera,
    transform::{Axis, TransformState},
};

/// Degrees per rotate keypress.
pub const ROTATE_STEP_DEG: f32 = 10.0;
/// Relative change per scale keypress.
pub const SCALE_STEP: f32 = 0.01;
/// Translate step as a fraction of the mesh's largest coordinate.
pub const TRANSLATE_STEP_FRACTION: f32 = 0.01;
/// `a`/`d` move along Z this many translate steps at once.
pub const DEPTH_STEP_FACTOR: f32 = 10.0;

/// Input key, independent of any windowing library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown key '{0}'")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "up" => Ok(Key::Up),
            "down" => Ok(Key::Down),
            "left" => Ok(Key::Left),
            "right" => Ok(Key::Right),
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Key::Char(c)),
                    _ => Err(UnknownKey(s.to_owned())),
                }
            }
        }
    }
}

/// What the arrow / `a` / `d` keys currently do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Operation {
    #[default]
    None,
    Translate,
    Rotate,
    Scale,
}

/// Axis and direction a movement key points along on screen:
/// Up/Down is Y, Right/Left is X, `a`/`d` is Z.
fn key_direction(key: Key) -> Option<(Axis, f32)> {
    match key {
        Key::Up => Some((Axis::Y, 1.0)),
        Key::Down => Some((Axis::Y, -1.0)),
        Key::Right => Some((Axis::X, 1.0)),
        Key::Left => Some((Axis::X, -1.0)),
        Key::Char('a') => Some((Axis::Z, 1.0)),
        Key::Char('d') => Some((Axis::Z, -1.0)),
        _ => None,
    }
}

/// Owns everything one mesh viewer needs between frames.
#[derive(Clone, Debug)]
pub struct Session {
    mesh: Mesh,
    transform: TransformState,
    camera: Camera,
    operation: Operation,
    wireframe: bool,
    textured: bool,
    translate_unit: f32,
}

impl Session {
    pub fn new(mesh: Mesh, aspect: f32) -> Self {
        Self::with_fov(mesh, Camera::DEFAULT_FOV_Y_DEG.to_radians(), aspect)
    }

    /// Recenter the mesh on the origin and frame it.
    pub fn with_fov(mesh: Mesh, fov_y_rad: f32, aspect: f32) -> Self {
        let transform = TransformState::new(mesh.center);
        let camera = Camera::framing(&mesh.bounds, fov_y_rad, aspect);
        let largest = mesh.bounds.max_abs_coordinate();
        let translate_unit = if largest > 0.0 {
            TRANSLATE_STEP_FRACTION * largest
        } else {
            TRANSLATE_STEP_FRACTION
        };
        log::debug!(
            "Session: center {}, camera distance {:.3}, translate unit {:.4}",
            mesh.center,
            camera.distance(),
            translate_unit
        );

        Self {
            mesh,
            transform,
            camera,
            operation: Operation::None,
            wireframe: false,
            textured: false,
            translate_unit,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn textured(&self) -> bool {
        self.textured
    }

    pub fn translate_unit(&self) -> f32 {
        self.translate_unit
    }

    /// Window resized.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera = self
            .camera
            .with_aspect(width.max(1) as f32 / height.max(1) as f32);
    }

    /// Full clip-space transform for this frame.
    pub fn mvp(&self) -> Mat4 {
        self.camera.proj_view() * self.transform.model()
    }

    /// Apply one key press. Returns `true` if the display needs refreshing.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Char('t') => self.select(Operation::Translate),
            Key::Char('r') => self.select(Operation::Rotate),
            Key::Char('e') => self.select(Operation::Scale),
            Key::Char('v') => {
                self.wireframe = !self.wireframe;
                log::info!("Wireframe {}", if self.wireframe { "on" } else { "off" });
                true
            }
            Key::Char('1') => {
                self.textured = false;
                log::info!("Texture disabled");
                true
            }
            Key::Char('2') => {
                self.textured = true;
                log::info!("Texture enabled");
                true
            }
            other => self.nudge(other),
        }
    }

    fn select(&mut self, op: Operation) -> bool {
        self.operation = op;
        log::info!("Operation: {:?}", op);
        false
    }

    fn nudge(&mut self, key: Key) -> bool {
        let Some((axis, sign)) = key_direction(key) else {
            return false;
        };

        match self.operation {
            Operation::None => return false,
            Operation::Translate => {
                let step = if axis == Axis::Z {
                    self.translate_unit * DEPTH_STEP_FACTOR
                } else {
                    self.translate_unit
                };
                let d = axis.unit() * sign * step;
                self.transform.translate(d.x, d.y, d.z);
            }
            Operation::Rotate => {
                // Up/Down tilts about X, Right/Left spins about Y.
                let about = match axis {
                    Axis::X => Axis::Y,
                    Axis::Y => Axis::X,
                    Axis::Z => Axis::Z,
                };
                self.transform.rotate(about, sign * ROTATE_STEP_DEG);
            }
            Operation::Scale => {
                let s = Vec3::ONE + axis.unit() * sign * SCALE_STEP;
                self.transform.scale(s.x, s.y, s.z);
            }
        }
        true
    }
}
