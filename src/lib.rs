//! Real-time ray-traced sphere viewer.
//!
//! The scene (one sphere over an infinite checkerboard floor) is evaluated
//! per pixel inside a fragment shader; a full-screen quad triggers the rays.
//! Host-side code owns the window, camera and input plumbing, and the
//! [`trace`] module mirrors the shader math on the CPU so the interesting
//! logic stays testable and can run headless.

pub mod app;
pub mod camera;
pub mod controller;
pub mod input;
pub mod render;
pub mod scene;
pub mod trace;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::App;
pub use camera::Camera;
pub use controller::{Controller, MoveState};
pub use input::{Command, LookMode};
pub use render::{FrameParams, RenderInitError, Renderer};
pub use scene::{Scene, Sphere};
