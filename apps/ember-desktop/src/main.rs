mod config;

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use ember_client::Player;
use ember_common::{KeySequence, MouseButton};
use ember_input::{
    InputRouter, InputSnapshot, RouterRegistry, Subscription, WinitBridge, handle_of,
};
use ember_kernel::{Lane, TickDriver, Ticker, UpdateFn};
use ember_render::FlyCamera;
use glam::Vec3;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::DesktopConfig;

#[derive(Parser)]
#[command(name = "ember-desktop", about = "Ember desktop application")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

type SharedRouter = Rc<InputRouter>;

/// Everything that exists once the window is open.
struct Session {
    window: Arc<Window>,
    player: Rc<RefCell<Player>>,
    snapshot: Rc<RefCell<InputSnapshot<SharedRouter>>>,
    mouse_captured: Rc<Cell<bool>>,
    _subscriptions: Vec<Subscription>,
}

struct DesktopApp {
    config: DesktopConfig,
    exit_keys: KeySequence,
    registry: RouterRegistry,
    bridge: WinitBridge,
    driver: TickDriver,
    session: Option<Session>,
    last_frame: Instant,
    tick_accumulator: f64,
}

impl DesktopApp {
    fn new(config: DesktopConfig, exit_keys: KeySequence) -> Self {
        Self {
            bridge: WinitBridge::with_pixels_per_line(config.scroll_pixels_per_line),
            driver: TickDriver::new(Lane::MAIN).with_budget(config.tick_budget()),
            registry: RouterRegistry::new(),
            session: None,
            last_frame: Instant::now(),
            tick_accumulator: 0.0,
            exit_keys,
            config,
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attrs)?);
        let router = self.registry.attach(handle_of(window.id()));

        let mut camera = FlyCamera::at(Vec3::new(0.0, 1.7, 0.0));
        let size = window.inner_size();
        camera.set_aspect(size.width, size.height);
        let player = Player::spawn(&router, camera, self.config.player_config())?;

        let mouse_captured = Rc::new(Cell::new(false));
        let subscriptions = {
            let r = &router;
            let captured = mouse_captured.clone();
            let capture_window = window.clone();
            let capture = r.on_mouse_button(move |ev| {
                if ev.button == MouseButton::Right {
                    captured.set(ev.action.is_down());
                    capture_window.set_cursor_visible(!captured.get());
                }
                false
            });
            let drops = r.on_drop(|ev| {
                for path in &ev.paths {
                    tracing::info!(path = %path.display(), "file dropped, no loader registered");
                }
                false
            });
            vec![capture, drops]
        };

        let mut snapshot = InputSnapshot::new(router.clone());
        snapshot.watch_sequence(&self.exit_keys);
        let snapshot = Rc::new(RefCell::new(snapshot));

        // Scheduling order matters: bindings fire before the snapshot samples.
        self.driver
            .schedule(Ticker::every_tick(router).labeled("input").pinned(Lane::MAIN))?;
        self.driver
            .schedule(Ticker::every_tick(snapshot.clone()).labeled("snapshot"))?;

        let title_window = window.clone();
        let title_player = Rc::downgrade(&player);
        let title = self.config.title.clone();
        let title_rate = (self.config.ticks_per_second / 4.0).max(1.0) as u32;
        self.driver.schedule(
            Ticker::new(
                UpdateFn(move |tick: u64| {
                    if let Some(player) = title_player.upgrade() {
                        let p = player.borrow().position();
                        title_window.set_title(&format!(
                            "{title} | tick {tick} | pos ({:.1}, {:.1}, {:.1})",
                            p.x, p.y, p.z
                        ));
                    }
                }),
                title_rate,
            )
            .labeled("title")
            .pinned(Lane::MAIN),
        )?;

        tracing::info!(window = ?window.id(), "window opened");
        self.session = Some(Session {
            window,
            player,
            snapshot,
            mouse_captured,
            _subscriptions: subscriptions,
        });
        Ok(())
    }

    fn run_ticks(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        let interval = self.config.tick_interval();
        self.tick_accumulator += dt;
        let mut ran = 0;
        while self.tick_accumulator >= interval && ran < self.config.max_ticks_per_frame {
            self.tick_accumulator -= interval;
            self.driver.advance();
            ran += 1;
        }
        if self.tick_accumulator >= interval {
            tracing::debug!(
                dropped = (self.tick_accumulator / interval) as u64,
                "tick backlog dropped"
            );
            self.tick_accumulator %= interval;
        }
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        if let Err(err) = self.open(event_loop) {
            tracing::error!("failed to open window: {err:#}");
            event_loop.exit();
        }
        self.last_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(size) => {
                if let Some(session) = &self.session {
                    session
                        .player
                        .borrow_mut()
                        .camera_mut()
                        .set_aspect(size.width, size.height);
                }
            }
            _ => {}
        }

        let handle = handle_of(window_id);
        for raw in self.bridge.translate(&event) {
            self.registry.deliver(handle, raw);
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        let Some(session) = &self.session else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta } = event {
            if session.mouse_captured.get() {
                session
                    .player
                    .borrow_mut()
                    .camera_mut()
                    .rotate(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_none() {
            return;
        }
        self.run_ticks();

        if let Some(session) = &self.session {
            if session.snapshot.borrow().check_sequence(&self.exit_keys) {
                tracing::info!("exit keys held");
                event_loop.exit();
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        for stats in self.driver.report() {
            tracing::info!(%stats, "ticker");
        }
        if let Some(session) = &self.session {
            let p = session.player.borrow().position();
            tracing::info!(
                window = ?session.window.id(),
                x = p.x,
                y = p.y,
                z = p.z,
                "final player position"
            );
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = DesktopConfig::load(cli.config.as_deref())?;
    let exit_keys = config.exit_sequence()?;
    tracing::info!(title = %config.title, tps = config.ticks_per_second, "ember-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DesktopApp::new(config, exit_keys);
    event_loop.run_app(&mut app)?;

    Ok(())
}
