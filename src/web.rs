#![cfg(target_arch = "wasm32")]

//! Browser entry point: binds the viewer to a canvas element by id.

use std::sync::Arc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::web::{EventLoopExtWebSys, WindowAttributesExtWebSys};
use winit::window::Window;

use crate::app::App;
use crate::camera::Camera;
use crate::controller::Controller;
use crate::render::Renderer;
use crate::scene::Scene;

/// Starts the viewer on the canvas with the given element id. The returned
/// promise rejects on any setup failure so the page can surface an alert.
#[wasm_bindgen]
pub async fn run(canvas_id: String) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("missing document"))?;
    let element = document
        .get_element_by_id(&canvas_id)
        .ok_or_else(|| JsValue::from_str("canvas element not found"))?;
    let canvas: web_sys::HtmlCanvasElement = element
        .dyn_into()
        .map_err(|_| JsValue::from_str("element is not a canvas"))?;

    let event_loop = EventLoop::new()
        .map_err(|err| JsValue::from_str(&format!("failed to create event loop: {err}")))?;
    #[allow(deprecated)]
    let window = Arc::new(
        event_loop
            .create_window(
                Window::default_attributes()
                    .with_canvas(Some(canvas))
                    .with_title("Orbview"),
            )
            .map_err(|err| JsValue::from_str(&format!("window error: {err}")))?,
    );

    let renderer = Renderer::new(Arc::clone(&window), &Scene::default())
        .await
        .map_err(|err| JsValue::from_str(&format!("renderer error: {err}")))?;

    let mut app = App::new(renderer, Camera::default(), Controller::default());

    event_loop.spawn(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);
        if let Err(err) = app.process_event(&event, elwt) {
            web_sys::console::error_1(&JsValue::from_str(&format!("Error: {err}")));
            elwt.exit();
        }
    });

    Ok(())
}
