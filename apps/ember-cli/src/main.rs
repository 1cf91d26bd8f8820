use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use ember_client::{Player, PlayerConfig};
use ember_common::keys::{key, scancode};
use ember_common::{Action, KeyCode, KeySequence, Modifiers, Scancode, WindowHandle};
use ember_input::{
    CharEvent, DropEvent, InputSnapshot, KeyEvent, RawEvent, RouterRegistry, ScrollEvent,
};
use ember_kernel::{Lane, TickDriver, Ticker, UpdateFn};
use ember_render::{DebugTextRenderer, FlyCamera, Frame, Renderer};
use glam::DVec2;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ember-cli", about = "Headless demos of the Ember input and tick core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Replay a scripted input session through a router and a player
    InputDemo {
        /// Ticks to hold W for
        #[arg(long, default_value = "30")]
        hold: u64,
    },
    /// Run tickers at different rates and print the scheduler report
    Ticks {
        /// Rate of the slow ticker
        #[arg(short, long, default_value = "4")]
        rate: u32,
        /// Number of global ticks to run
        #[arg(short, long, default_value = "120")]
        ticks: u64,
    },
}

const WINDOW: WindowHandle = WindowHandle(1);

fn key_event(key: KeyCode, scancode: Scancode, action: Action) -> RawEvent {
    RawEvent::Key(KeyEvent {
        key,
        scancode,
        action,
        mods: Modifiers::NONE,
    })
}

fn input_demo(hold: u64) -> anyhow::Result<()> {
    let registry = RouterRegistry::new();
    let router = registry.attach(WINDOW);
    let renderer = DebugTextRenderer::new();

    let player = Player::spawn(&router, FlyCamera::default(), PlayerConfig::default())?;

    // A modal consumer on top of a logging one: the modal swallows keys until
    // Escape closes it, after which keys fall through to the logger.
    let logged = Rc::new(Cell::new(0u32));
    let modal_closed = Rc::new(Cell::new(false));
    let typed = Rc::new(RefCell::new(String::new()));
    let _subs = {
        let r = &router;
        let count = logged.clone();
        let base = r.on_key(move |ev| {
            tracing::debug!(key = ev.key.0, action = ?ev.action, "base consumer");
            count.set(count.get() + 1);
            false
        });
        let closed = modal_closed.clone();
        let modal = r.on_key(move |ev| {
            let done = ev.key == key::ESCAPE && ev.action == Action::Press;
            closed.set(done);
            done
        });
        let text = typed.clone();
        let chars = r.on_char(move |ev| {
            text.borrow_mut().extend(ev.as_char());
            false
        });
        vec![base, modal, chars]
    };

    let mut snapshot = InputSnapshot::new(router.clone());
    let combo = KeySequence::from([key::LEFT_CONTROL, key::S]);
    snapshot.watch_sequence(&combo);
    let snapshot = Rc::new(RefCell::new(snapshot));

    let mut driver = TickDriver::new(Lane::MAIN);
    driver.schedule(Ticker::every_tick(router.clone()).labeled("input"))?;
    driver.schedule(Ticker::every_tick(snapshot.clone()).labeled("snapshot"))?;

    registry.deliver(WINDOW, key_event(key::W, scancode::W, Action::Press));
    for _ in 0..hold {
        driver.advance();
    }
    registry.deliver(WINDOW, key_event(key::W, scancode::W, Action::Release));
    driver.advance();

    registry.deliver(WINDOW, key_event(key::ESCAPE, scancode::ESCAPE, Action::Press));
    registry.deliver(WINDOW, key_event(key::ESCAPE, scancode::ESCAPE, Action::Release));
    for ch in "hi".chars() {
        registry.deliver(WINDOW, RawEvent::Char(CharEvent::new(ch)));
    }
    registry.deliver(
        WINDOW,
        RawEvent::Scroll(ScrollEvent {
            offset: DVec2::new(0.0, -1.0),
        }),
    );
    registry.deliver(
        WINDOW,
        RawEvent::Drop(DropEvent {
            paths: vec![PathBuf::from("scene.gltf")],
        }),
    );
    registry.deliver(WINDOW, key_event(key::LEFT_CONTROL, scancode::LEFT_CONTROL, Action::Press));
    registry.deliver(WINDOW, key_event(key::S, scancode::S, Action::Press));
    let tick = driver.advance();

    let snap = snapshot.borrow();
    let frame = Frame::new(tick, player.borrow().camera().view())
        .with_line(format!("modal closed by escape: {}", modal_closed.get()))
        .with_line(format!("keys seen by base consumer: {}", logged.get()))
        .with_line(format!("typed: {:?}", typed.borrow()))
        .with_line(format!("scroll: {:?}", snap.scroll_offset()))
        .with_line(format!("ctrl+s held: {}", snap.check_sequence(&combo)));
    print!("{}", renderer.render(&frame));
    Ok(())
}

fn tick_report(rate: u32, ticks: u64) -> anyhow::Result<()> {
    let mut driver = TickDriver::new(Lane::MAIN);

    let fast_sum = Rc::new(Cell::new(0u64));
    let sum = fast_sum.clone();
    driver.schedule(
        Ticker::every_tick(UpdateFn(move |tick: u64| sum.set(sum.get() + tick))).labeled("fast"),
    )?;

    let mut buffer = vec![0.0f32; 4096];
    driver.schedule(
        Ticker::new(
            UpdateFn(move |tick: u64| {
                for (i, v) in buffer.iter_mut().enumerate() {
                    *v = (*v + (i as f32 + tick as f32).sin()) * 0.5;
                }
            }),
            rate,
        )
        .labeled("slow")
        .pinned(Lane::MAIN),
    )?;

    driver.schedule(Ticker::new(UpdateFn(|_: u64| {}), 0).labeled("parked"))?;

    let mut fired = 0;
    for _ in 0..ticks {
        let tick = driver.clock().advance();
        fired += driver.run(tick);
    }

    println!("Ran {ticks} ticks, {fired} updates");
    for stats in driver.report() {
        println!("  {stats}");
    }
    println!("fast checksum: {}", fast_sum.get());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("ember-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", ember_common::crate_info());
            println!("kernel: {}", ember_kernel::crate_info());
            println!("input: {}", ember_input::crate_info());
            println!("render: {}", ember_render::crate_info());
            println!("client: {}", ember_client::crate_info());
        }
        Commands::InputDemo { hold } => input_demo(hold)?,
        Commands::Ticks { rate, ticks } => tick_report(rate, ticks)?,
    }

    Ok(())
}
