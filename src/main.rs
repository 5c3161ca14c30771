use std::env;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use pollster::block_on;
use winit::dpi::LogicalSize;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::Window;

use orbview::{trace, App, Camera, Controller, RenderInitError, Renderer, Scene};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let scene = Scene::default();
    let camera = Camera::default();
    let controller = Controller::new(options.speed, options.sensitivity);

    if options.headless {
        return run_headless(&options, &scene, &camera);
    }

    match run_interactive(&options, &scene, camera, controller) {
        Ok(()) => Ok(()),
        Err(err) => {
            if is_context_failure(&err) {
                eprintln!(
                    "{err}. Falling back to --headless mode (set DISPLAY or install GPU drivers to enable rendering)."
                );
                run_headless(&options, &scene, &camera)
            } else {
                Err(err)
            }
        }
    }
}

fn run_headless(options: &CliOptions, scene: &Scene, camera: &Camera) -> Result<()> {
    let stats = trace::trace_frame(camera, scene, options.width, options.height);
    println!(
        "Traced {}x{} frame: {} sphere hits, {} floor hits",
        stats.width, stats.height, stats.sphere_hits, stats.floor_hits
    );
    Ok(())
}

fn run_interactive(
    options: &CliOptions,
    scene: &Scene,
    camera: Camera,
    controller: Controller,
) -> Result<()> {
    let event_loop = EventLoop::new()
        .map_err(|err| RenderInitError::Context(format!("event loop unavailable: {err}")))?;

    // The surface size is captured once at startup; keeping the window
    // non-resizable keeps the W/H uniforms in sync with it for the whole
    // session.
    #[allow(deprecated)]
    let window = Arc::new(
        event_loop
            .create_window(
                Window::default_attributes()
                    .with_title("Orbview")
                    .with_inner_size(LogicalSize::new(
                        options.width as f64,
                        options.height as f64,
                    ))
                    .with_resizable(false),
            )
            .map_err(|err| RenderInitError::Context(format!("window unavailable: {err}")))?,
    );

    let renderer = block_on(Renderer::new(Arc::clone(&window), scene))?;
    let mut app = App::new(renderer, camera, controller);
    let mut last_error = None;

    #[allow(deprecated)]
    event_loop.run(|event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);
        if let Err(err) = app.process_event(&event, elwt) {
            last_error = Some(err);
            elwt.exit();
        }
    })?;

    match last_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn is_context_failure(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<RenderInitError>(),
        Some(RenderInitError::Context(_))
    )
}

struct CliOptions {
    width: u32,
    height: u32,
    speed: f32,
    sensitivity: f32,
    headless: bool,
}

const USAGE: &str = "Usage: orbview [--width N] [--height N] [--speed F] [--sens F] [--headless]";

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut options = Self {
            width: 1280,
            height: 720,
            speed: 0.01,
            sensitivity: 0.1,
            headless: false,
        };
        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--width" => options.width = parse_value(&mut args, "--width")?,
                "--height" => options.height = parse_value(&mut args, "--height")?,
                "--speed" => options.speed = parse_value(&mut args, "--speed")?,
                "--sens" => options.sensitivity = parse_value(&mut args, "--sens")?,
                "--headless" => options.headless = true,
                other => {
                    return Err(anyhow!("Unknown argument: {other}. {USAGE}"));
                }
            }
        }
        if options.width == 0 || options.height == 0 {
            return Err(anyhow!("viewport must have a nonzero area. {USAGE}"));
        }
        Ok(options)
    }
}

fn parse_value<T>(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} expects a value. {USAGE}"))?;
    value
        .parse()
        .with_context(|| format!("invalid value for {flag}: {value}"))
}
