use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::Event;
use indoc::indoc;
use ratatui::style::Style;

use dockwm::arbiter::FrameInputArbiter;
use dockwm::config::WmConfig;
use dockwm::dock::{DockEdge, RailDock};
use dockwm::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use dockwm::drivers::keyboard::Shortcut;
use dockwm::drivers::{InputDriver, OutputDriver};
use dockwm::event_loop::{ControlFlow, EventLoop, LoopEvent};
use dockwm::geometry::{Rect, Size};
use dockwm::input::{MouseState, MouseTracker};
use dockwm::tracing_sub;
use dockwm::ui::{Projection, UiFrame};
use dockwm::window::decorator::{MonospaceMeasure, TextMeasure};
use dockwm::window::{MenuLayer, WindowId, WindowManager, WindowOptions};

const AFTER_HELP: &str = indoc! {"
    Keys:
      n        open a new window
      1-9      bring window N forward (restores it if minimized or closed)
      e        move the dock to the next screen edge
      q, Esc   quit

    Mouse:
      drag a title bar to move, drag the corner grip to resize,
      double-click a title bar to maximize, click a dock icon to restore.
"};

const STARTER_TITLES: [&str; 6] = ["Terminal", "Notes", "Calendar", "Mail", "Music", "Photos"];

#[derive(Parser, Debug)]
#[command(name = "dockwm", version, about = "Floating window manager demo", after_help = AFTER_HELP)]
struct Args {
    /// Logical desktop width in pixels.
    #[arg(long, default_value_t = 1920.0)]
    width: f32,
    /// Logical desktop height in pixels.
    #[arg(long, default_value_t = 1080.0)]
    height: f32,
    /// Screen edge the dock is attached to: left, right, top or bottom.
    #[arg(long, default_value_t = DockEdge::Left)]
    dock_edge: DockEdge,
    #[arg(long, default_value_t = dockwm::constants::DOCK_THICKNESS)]
    dock_thickness: f32,
    /// Windows to open at startup.
    #[arg(long, default_value_t = 3)]
    windows: usize,
    /// Append debug logs to this file. Nothing is logged otherwise.
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

/// Top bar listing every window; clicking a label activates it.
#[derive(Debug)]
struct TopBarMenu {
    width: f32,
    height: f32,
    entries: Vec<(WindowId, String)>,
    pending: Option<WindowId>,
}

impl TopBarMenu {
    const LEFT: f32 = 80.0;
    const GAP: f32 = 24.0;

    fn new(width: f32, height: f32, entries: Vec<(WindowId, String)>) -> Self {
        Self {
            width,
            height,
            entries,
            pending: None,
        }
    }

    fn label(index: usize, title: &str) -> String {
        format!("{} {}", index + 1, title)
    }

    fn entry_rects(&self) -> Vec<(WindowId, Rect, String)> {
        let measure = MonospaceMeasure::default();
        let mut x = Self::LEFT;
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (id, title))| {
                let label = Self::label(i, title);
                let width = measure.text_width(&label);
                let rect = Rect::new(x, 0.0, width, self.height);
                x += width + Self::GAP;
                (*id, rect, label)
            })
            .collect()
    }
}

impl MenuLayer for TopBarMenu {
    fn update(&mut self, mouse: &MouseState, arbiter: &mut FrameInputArbiter) {
        if !mouse.left_pressed || mouse.position.y >= self.height || !arbiter.click_available() {
            return;
        }
        arbiter.claim_for_menu();
        self.pending = self
            .entry_rects()
            .into_iter()
            .find(|(_, rect, _)| rect.contains(mouse.position))
            .map(|(id, _, _)| id);
    }

    fn take_activation(&mut self) -> Option<WindowId> {
        self.pending.take()
    }

    fn draw(&self, frame: &mut UiFrame<'_>) {
        let projection = *frame.projection();
        let bar = projection.project(Rect::new(0.0, 0.0, self.width, self.height));
        if bar.width == 0 || bar.height == 0 {
            return;
        }
        let style = Style::default()
            .bg(dockwm::theme::menu_bg())
            .fg(dockwm::theme::menu_fg());
        frame.set_string(bar.x, bar.y, &" ".repeat(bar.width as usize), style);
        frame.set_string(bar.x, bar.y, " dockwm", style);
        for (_, rect, label) in self.entry_rects() {
            let cell = projection.project(rect);
            if cell.width > 0 {
                frame.set_string(cell.x, bar.y, &label, style);
            }
        }
    }
}

struct Demo {
    wm: WindowManager,
    ids: Vec<WindowId>,
}

impl Demo {
    fn new(config: WmConfig) -> Self {
        let dock = RailDock::new(config.dock_edge, config.dock_thickness, config.desktop_rect());
        Self {
            wm: WindowManager::new(config, Some(Box::new(dock))),
            ids: Vec::new(),
        }
    }

    fn open_next(&mut self) {
        let n = self.ids.len();
        let title = STARTER_TITLES
            .get(n)
            .map(|t| t.to_string())
            .unwrap_or_else(|| format!("Window {}", n + 1));
        match self.wm.open(&title, WindowOptions::default()) {
            Ok(id) => {
                self.ids.push(id);
                self.refresh_menu();
            }
            Err(err) => tracing::warn!(error = %err, "could not open window"),
        }
    }

    fn refresh_menu(&mut self) {
        let entries = self
            .ids
            .iter()
            .filter_map(|id| self.wm.window(*id).map(|w| (*id, w.title().to_string())))
            .collect();
        let config = self.wm.config();
        let menu = TopBarMenu::new(config.screen.width, config.top_bar_height, entries);
        self.wm.set_menu_layer(Box::new(menu));
    }

    fn activate(&mut self, slot: usize) {
        let Some(id) = self.ids.get(slot).copied() else {
            return;
        };
        if let Err(err) = self.wm.handle_external_activation_request(id) {
            tracing::warn!(window_id = %id, error = %err, "activation failed");
        }
    }

    fn cycle_dock_edge(&mut self) {
        let next = self.wm.config().dock_edge.next();
        self.wm.set_dock_edge(next);
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        tracing_sub::init_with_file(path, tracing::Level::DEBUG)?;
    }

    let mut config = WmConfig::default()
        .with_screen(Size::new(args.width, args.height))
        .with_dock_edge(args.dock_edge);
    config.dock_thickness = args.dock_thickness;

    let mut demo = Demo::new(config);
    for _ in 0..args.windows {
        demo.open_next();
    }
    demo.refresh_menu();

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut input = ConsoleInputDriver::new();
    input.set_mouse_capture(true)?;

    let mut projection = Projection::new(config.screen, output.area()?);
    let mut tracker = MouseTracker::new();
    let frame_interval = Duration::from_secs(1) / args.fps.max(1);
    let mut event_loop = EventLoop::new(input, frame_interval);

    let result = event_loop.run(|_driver, event| {
        match event {
            LoopEvent::Input(Event::Key(key)) => match Shortcut::from_key(&key) {
                Some(Shortcut::Quit) => return Ok(ControlFlow::Quit),
                Some(Shortcut::NewWindow) => demo.open_next(),
                Some(Shortcut::Activate(slot)) => demo.activate(slot),
                Some(Shortcut::CycleDockEdge) => demo.cycle_dock_edge(),
                None => {}
            },
            LoopEvent::Input(Event::Mouse(mouse)) => tracker.handle_event(&mouse, &projection),
            LoopEvent::Input(Event::Resize(_, _)) => {
                projection = Projection::new(config.screen, output.area()?);
            }
            LoopEvent::Input(_) => {}
            LoopEvent::Frame(dt) => {
                let mouse = tracker.take_frame();
                demo.wm.update(&mouse, dt.as_secs_f32());
                output.draw(config.screen, |frame| demo.wm.draw(frame))?;
            }
        }
        Ok(ControlFlow::Continue)
    });

    output.exit()?;
    result
}
