//! Backdrop builder and the windowed driver.
//!
//! [`Backdrop`] is the public entry point: configure with method chaining,
//! then call [`run`](Backdrop::run) to open a window and animate until it is
//! closed. The driver owns the event loop, folds pointer and resize events
//! into the simulation, and paces ticks off `RedrawRequested`.
//!
//! Reduced motion is honored at mount: one tick is simulated and rendered so
//! the window is not blank, and no further redraw is ever requested.

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::error::RunError;
use crate::gpu::GpuState;
use crate::simulation::{FieldSimulation, Viewport};
use crate::time::Time;
use crate::visuals::VisualConfig;

/// Where the driver is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No window yet.
    Uninitialized,
    /// Ticking every frame.
    Running,
    /// No further ticks will be scheduled.
    Stopped,
}

/// Decides whether a frame may tick.
///
/// With reduced motion requested, exactly one tick is admitted and the pacing
/// then refuses forever; a frame already in flight completes but nothing is
/// rescheduled after it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pacing {
    reduce_motion: bool,
    ticks: u64,
    phase: Phase,
}

impl Pacing {
    pub(crate) fn new(reduce_motion: bool) -> Self {
        Self {
            reduce_motion,
            ticks: 0,
            phase: Phase::Uninitialized,
        }
    }

    /// Mark the driver mounted.
    pub(crate) fn start(&mut self) {
        if self.phase == Phase::Uninitialized {
            self.phase = Phase::Running;
        }
    }

    /// Whether a tick may run now. Counts admitted ticks; transitions to
    /// `Stopped` after the single reduced-motion frame.
    pub(crate) fn admit(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.ticks += 1;
        if self.reduce_motion {
            self.phase = Phase::Stopped;
        }
        true
    }

    /// Whether another frame should be scheduled after the current one.
    pub(crate) fn keep_going(&self) -> bool {
        self.phase == Phase::Running
    }

    #[inline]
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub(crate) fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Builder for the ambient backdrop window.
///
/// # Example
///
/// ```ignore
/// use driftfield::prelude::*;
///
/// Backdrop::new()
///     .with_title("drift")
///     .with_visuals(|v| {
///         v.glyph(Vec3::new(0.9, 0.5, 0.2));
///     })
///     .run()
/// ```
pub struct Backdrop {
    visuals: VisualConfig,
    reduce_motion: bool,
    rng_seed: Option<u64>,
    title: String,
}

impl Backdrop {
    pub fn new() -> Self {
        Self {
            visuals: VisualConfig::default(),
            reduce_motion: false,
            rng_seed: None,
            title: "driftfield".to_string(),
        }
    }

    /// Adjust the visual configuration in place.
    pub fn with_visuals(mut self, configure: impl FnOnce(&mut VisualConfig)) -> Self {
        configure(&mut self.visuals);
        self
    }

    /// Honor a reduced-motion preference: render a single static frame and
    /// never tick again.
    pub fn with_reduced_motion(mut self, reduce: bool) -> Self {
        self.reduce_motion = reduce;
        self
    }

    /// Seed the simulation's random source for a reproducible field.
    /// Without a seed, system entropy is used.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Open the window and run until it is closed. Blocks.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let rng = match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut app = App {
            window: None,
            gpu: None,
            sim: None,
            rng,
            pacing: Pacing::new(self.reduce_motion),
            time: Time::new(),
            visuals: self.visuals,
            title: self.title,
            init_error: None,
        };
        event_loop.run_app(&mut app)?;

        // Initialization failures exit the loop; surface them to the caller.
        match app.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    sim: Option<FieldSimulation>,
    rng: SmallRng,
    pacing: Pacing,
    time: Time,
    visuals: VisualConfig,
    title: String,
    init_error: Option<RunError>,
}

impl App {
    fn handle_resize(&mut self, physical: PhysicalSize<u32>) {
        let Some(window) = &self.window else { return };
        let (Some(gpu), Some(sim)) = (self.gpu.as_mut(), self.sim.as_mut()) else {
            return;
        };

        gpu.resize(physical);

        let scale = window.scale_factor();
        let logical = physical.to_logical::<f32>(scale);
        sim.reset(
            Viewport::new(logical.width, logical.height, scale),
            &mut self.rng,
        );
        log::debug!(
            "viewport reset: {:.0}x{:.0} logical, {} particles",
            logical.width,
            logical.height,
            sim.particles().len()
        );
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu), Some(sim)) = (self.gpu.as_mut(), self.sim.as_mut()) else {
            return;
        };

        if self.pacing.admit() {
            sim.step(&mut self.rng);
            self.time.update();
            if self.time.frame() % 300 == 0 {
                log::debug!("t={:.0}s fps={:.1}", self.time.elapsed(), self.time.fps());
            }

            match gpu.render(sim) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => gpu.resize(PhysicalSize {
                    width: gpu.config.width,
                    height: gpu.config.height,
                }),
                Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                Err(e) => eprintln!("Render error: {:?}", e),
            }
        }
        if self.pacing.keep_going() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes().with_title(&self.title);
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.init_error = Some(err.into());
                event_loop.exit();
                return;
            }
        };

        let gpu = match pollster::block_on(GpuState::new(window.clone(), &self.visuals)) {
            Ok(gpu) => gpu,
            Err(err) => {
                self.init_error = Some(err.into());
                event_loop.exit();
                return;
            }
        };

        let scale = window.scale_factor();
        let logical = window.inner_size().to_logical::<f32>(scale);
        let sim = FieldSimulation::new(
            Viewport::new(logical.width, logical.height, scale),
            &mut self.rng,
        );
        log::info!(
            "field mounted: {:.0}x{:.0} logical, {} particles{}",
            logical.width,
            logical.height,
            sim.particles().len(),
            if self.pacing.reduce_motion {
                ", reduced motion"
            } else {
                ""
            }
        );

        self.pacing.start();
        window.request_redraw();

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.sim = Some(sim);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(sim), Some(window)) = (self.sim.as_mut(), self.window.as_ref()) {
            sim.pointer_mut().handle_event(&event, window.scale_factor());
        }

        match event {
            WindowEvent::CloseRequested => {
                log::debug!(
                    "close requested after {} ticks ({:?})",
                    self.pacing.ticks(),
                    self.pacing.phase()
                );
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => self.handle_resize(physical_size),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
