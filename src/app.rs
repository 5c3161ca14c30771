//! Shared application state driven by the platform event loop.

use anyhow::{anyhow, Result};
use glam::{Mat4, Vec3};
use log::{info, warn};
use winit::event::{DeviceEvent, ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;

use crate::camera::Camera;
use crate::controller::Controller;
use crate::input::{self, Command, LookMode};
use crate::render::{FrameParams, Renderer};

/// Model-view-projection for the trigger quad, built from fixed constants.
/// The hard-coded unit aspect keeps the quad overfilling the viewport at any
/// window size.
pub fn quad_mvp() -> Mat4 {
    let view = Mat4::look_at_rh(Vec3::new(-1.0, 0.0, 0.0), Vec3::ZERO, Vec3::Z);
    let projection = Mat4::perspective_rh_gl(45f32.to_radians(), 1.0, 0.1, 100.0);
    projection * view
}

/// Viewer state: renderer, camera and input plumbing, stepped once per
/// redraw. Owning everything in one value keeps the loop deterministic and
/// lets tests drive the pieces in isolation.
pub struct App {
    renderer: Renderer,
    camera: Camera,
    controller: Controller,
    mode: LookMode,
    // Captured once at startup; the W/H uniforms follow this, not later
    // surface reconfigurations.
    viewport: (u32, u32),
}

impl App {
    pub fn new(renderer: Renderer, camera: Camera, controller: Controller) -> Self {
        let size = renderer.window().inner_size();
        Self {
            renderer,
            camera,
            controller,
            mode: LookMode::default(),
            viewport: (size.width.max(1), size.height.max(1)),
        }
    }

    /// Routes one event-loop event. A returned error aborts the loop.
    pub fn process_event(&mut self, event: &Event<()>, elwt: &ActiveEventLoop) -> Result<()> {
        match event {
            Event::WindowEvent { event, window_id } if *window_id == self.renderer.window_id() => {
                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => self.renderer.resize(*size),
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = self.renderer.window().inner_size();
                        self.renderer.resize(size);
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        self.handle_mouse_button(*state, *button);
                    }
                    WindowEvent::KeyboardInput { event, .. } => self.handle_keyboard(event),
                    WindowEvent::Focused(false) => self.unlock(),
                    WindowEvent::RedrawRequested => self.redraw()?,
                    _ => {}
                }
            }
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta },
                ..
            } => {
                if self.mode.is_locked() {
                    self.controller
                        .apply_mouse_delta(&mut self.camera, delta.0 as f32, delta.1 as f32);
                }
            }
            Event::AboutToWait => self.renderer.window().request_redraw(),
            _ => {}
        }
        Ok(())
    }

    /// A left click captures the pointer; look and movement stay inert until
    /// it does.
    fn handle_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        if state != ElementState::Pressed || button != MouseButton::Left || self.mode.is_locked() {
            return;
        }
        match input::grab_pointer(self.renderer.window()) {
            Ok(()) => self.mode = LookMode::Locked,
            Err(err) => warn!("pointer capture unavailable: {err}"),
        }
    }

    fn handle_keyboard(&mut self, event: &KeyEvent) {
        let Some(command) = input::map_key(event.physical_key) else {
            return;
        };
        if command == Command::Unlock {
            if event.state == ElementState::Pressed {
                self.unlock();
            }
            return;
        }
        if !self.mode.is_locked() {
            return;
        }
        self.controller
            .handle_command(command, event.state == ElementState::Pressed);
    }

    fn unlock(&mut self) {
        if !self.mode.is_locked() {
            return;
        }
        input::release_pointer(self.renderer.window());
        self.mode = LookMode::Unlocked;
        // Keys must not stick across the mode change.
        self.controller.movement.clear();
    }

    fn redraw(&mut self) -> Result<()> {
        self.controller.step(&mut self.camera);
        let params = FrameParams {
            mvp: quad_mvp(),
            eye: self.camera.eye,
            dir: self.camera.dir(),
            up: self.camera.up,
            width: self.viewport.0 as f32,
            height: self.viewport.1 as f32,
        };
        self.renderer.update_globals(&params);
        if let Err(err) = self.renderer.render() {
            match err {
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                    let size = self.renderer.window().inner_size();
                    self.renderer.resize(size);
                }
                wgpu::SurfaceError::OutOfMemory => {
                    return Err(anyhow!("GPU is out of memory"));
                }
                wgpu::SurfaceError::Timeout => {
                    info!("surface timeout; retrying next frame");
                }
                wgpu::SurfaceError::Other => {
                    info!("surface reported an unknown error; retrying next frame");
                }
            }
        }
        Ok(())
    }
}
