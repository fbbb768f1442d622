use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::device::{DeviceError, Gpu, GpuInit, SurfaceSize};
use crate::render::PipelineBundle;
use crate::scene::{LoopControl, RenderLoopState, SceneConfig};

use super::ShutdownHandle;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "twin cubes".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, builds the GPU context and pipeline, and drives the
    /// render loop until the window closes, Escape is pressed, or `shutdown`
    /// is triggered.
    ///
    /// Startup failures are returned once the event loop has stopped.
    pub fn run(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        scene: SceneConfig,
        shutdown: ShutdownHandle,
    ) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, scene, shutdown);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    loop_state: RenderLoopState,

    /// Built right after the GPU context; `None` only during construction.
    bundle: Option<PipelineBundle>,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    scene: SceneConfig,
    shutdown: ShutdownHandle,

    entry: Option<WindowEntry>,
    startup_error: Option<anyhow::Error>,
}

impl AppState {
    fn new(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        scene: SceneConfig,
        shutdown: ShutdownHandle,
    ) -> Self {
        Self {
            config,
            gpu_init,
            scene,
            shutdown,
            entry: None,
            startup_error: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| DeviceError::NoSurface(e.to_string()))
            .context("failed to create window")?;

        let size = SurfaceSize::from(window.inner_size());
        let scale_factor = window.scale_factor();
        let gpu_init = self.gpu_init.clone();

        let mut entry = WindowEntryTryBuilder {
            loop_state: RenderLoopState::new(self.scene.clone(), size, scale_factor),
            bundle: None,
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        entry.with_mut(|fields| -> Result<()> {
            let gpu = &*fields.gpu;
            let bundle = PipelineBundle::new(gpu.device(), gpu.surface_format(), gpu.size())
                .context("pipeline creation failed")?;
            *fields.bundle = Some(bundle);
            Ok(())
        })?;

        Ok(entry)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.startup_error = Some(err);
        event_loop.exit();
    }

    fn resize(&mut self, size: SurfaceSize, scale_factor: f64) {
        let Some(entry) = self.entry.as_mut() else { return };
        let wants_redraw = entry.with_mut(|fields| {
            let Some(bundle) = fields.bundle.as_mut() else { return false };
            fields.loop_state.resize(fields.gpu, bundle, size, scale_factor);
            fields.loop_state.wants_redraw()
        });
        if wants_redraw {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn tick(&mut self) -> LoopControl {
        let Some(entry) = self.entry.as_mut() else {
            return LoopControl::Continue;
        };

        let (control, wants_redraw) = entry.with_mut(|fields| {
            let Some(bundle) = fields.bundle.as_ref() else {
                return (LoopControl::Continue, false);
            };
            let window: &Window = fields.window;
            let control = fields
                .loop_state
                .tick(fields.gpu, bundle, || window.pre_present_notify());
            (control, fields.loop_state.wants_redraw())
        });

        // Re-arm for the next display refresh; a surface with no area waits
        // for the next resize instead.
        if control == LoopControl::Continue && wants_redraw {
            entry.with_window(|w| w.request_redraw());
        }
        control
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shutdown.is_requested() {
            log::info!("shutdown requested");
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.entry = None;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                let Some(scale) = self.entry.as_ref().map(|e| e.with_window(|w| w.scale_factor()))
                else {
                    return;
                };
                self.resize(SurfaceSize::from(new_size), scale);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let Some((old, old_scale)) = self.entry.as_ref().map(|e| {
                    e.with_loop_state(|s| (s.size(), s.scale_factor()))
                }) else {
                    return;
                };
                // Same logical size, new device pixel ratio.
                let logical: LogicalSize<f64> =
                    PhysicalSize::new(old.width, old.height).to_logical(old_scale);
                self.resize(SurfaceSize::from_logical(logical, scale_factor), scale_factor);
            }

            WindowEvent::RedrawRequested => {
                if self.tick() == LoopControl::Exit {
                    self.entry = None;
                    event_loop.exit();
                }
            }

            _ => {}
        }

        if self.shutdown.is_requested() {
            event_loop.exit();
        }
    }
}
