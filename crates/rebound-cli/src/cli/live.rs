//! Live command: the interactive bouncing-circles window, in a terminal.
//!
//! The scene is drawn with ratatui's braille canvas and every left click
//! inside it spawns a random circle at the clicked spot.
//!
//! Keys: `a` toggles axes, `c` clears, space pauses, `q`/Esc quits.

use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::{debug, warn};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{self, Context, Points},
        Block, Borders, Paragraph,
    },
};

use rebound::{Canvas, ClickLatch, Rectangle, Rgb, Simulation};

use super::common::{flag_value, load_scene};
use super::scene::Click;

// ============================================================================
// CANVAS ADAPTER
// ============================================================================

/// Draws rebound shapes into a ratatui canvas [`Context`].
///
/// The braille marker gives 2x4 dots per cell; `dot_w`/`dot_h` are the world
/// size of one dot and set how densely filled shapes are hatched.
struct TerminalCanvas<'c, 'a> {
    ctx: &'c mut Context<'a>,
    color: Color,
    dot_w: f64,
    dot_h: f64,
    cell_w: f64,
}

impl<'c, 'a> TerminalCanvas<'c, 'a> {
    fn new(ctx: &'c mut Context<'a>, area: Rect, bounds: &Rectangle) -> Self {
        let cell_w = bounds.width() / area.width.max(1) as f64;
        let cell_h = bounds.height() / area.height.max(1) as f64;
        Self {
            ctx,
            color: Color::Black,
            dot_w: cell_w / 2.0,
            dot_h: cell_h / 4.0,
            cell_w,
        }
    }
}

fn tui_color(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

impl Canvas for TerminalCanvas<'_, '_> {
    fn clear(&mut self, _color: Rgb) {
        // The widget background is painted before `paint` runs.
    }

    fn set_pen_color(&mut self, color: Rgb) {
        self.color = tui_color(color);
    }

    fn set_pen_thickness(&mut self, _thickness: f64) {}

    fn filled_circle(&mut self, x: f64, y: f64, r: f64) {
        let step = self.dot_w.min(self.dot_h).max(r / 32.0);
        let mut radius = r;
        while radius > 0.0 {
            self.circle(x, y, radius);
            radius -= step;
        }
        self.point(x, y);
    }

    fn circle(&mut self, x: f64, y: f64, r: f64) {
        self.ctx.draw(&canvas::Circle {
            x,
            y,
            radius: r,
            color: self.color,
        });
    }

    fn filled_rectangle(&mut self, cx: f64, cy: f64, half_width: f64, half_height: f64) {
        let step = self.dot_h.max(half_height / 64.0);
        let mut y = cy - half_height;
        while y <= cy + half_height {
            self.line(cx - half_width, y, cx + half_width, y);
            y += step;
        }
    }

    fn rectangle(&mut self, cx: f64, cy: f64, half_width: f64, half_height: f64) {
        // ratatui anchors rectangles at their bottom-left corner
        self.ctx.draw(&canvas::Rectangle {
            x: cx - half_width,
            y: cy - half_height,
            width: 2.0 * half_width,
            height: 2.0 * half_height,
            color: self.color,
        });
    }

    fn point(&mut self, x: f64, y: f64) {
        self.ctx.draw(&Points {
            coords: &[(x, y)],
            color: self.color,
        });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ctx.draw(&canvas::Line {
            x1,
            y1,
            x2,
            y2,
            color: self.color,
        });
    }

    fn text(&mut self, x: f64, y: f64, text: &str) {
        let half = text.chars().count() as f64 * self.cell_w / 2.0;
        self.ctx.print(
            x - half,
            y,
            Span::styled(text.to_string(), Style::default().fg(self.color)),
        );
    }
}

/// Map a terminal cell to the world point at its center, or `None` when the
/// cell is outside `area`.
pub fn cell_to_world(area: Rect, bounds: &Rectangle, column: u16, row: u16) -> Option<(f64, f64)> {
    if column < area.x || row < area.y {
        return None;
    }
    let (dx, dy) = (column - area.x, row - area.y);
    if dx >= area.width || dy >= area.height {
        return None;
    }

    let fx = (dx as f64 + 0.5) / area.width as f64;
    let fy = (dy as f64 + 0.5) / area.height as f64;
    Some((
        bounds.top_left().x() + fx * bounds.width(),
        bounds.top_left().y() - fy * bounds.height(),
    ))
}

// ============================================================================
// APP
// ============================================================================

struct App {
    sim: Simulation,
    clicks: Vec<Click>,
    next_click: usize,
    latch: ClickLatch,
    /// Where the canvas was last drawn, for mapping mouse cells
    canvas_area: Rect,
    collisions: u64,
    paused: bool,
    should_quit: bool,
}

impl App {
    fn on_mouse(&mut self, mouse: MouseEvent) {
        let down = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left)
            | MouseEventKind::Drag(MouseButton::Left) => true,
            MouseEventKind::Up(MouseButton::Left) => false,
            _ => return,
        };
        if !self.latch.update(down) {
            return;
        }

        match cell_to_world(self.canvas_area, self.sim.bounds(), mouse.column, mouse.row) {
            Some((x, y)) => {
                if let Err(e) = self.sim.spawn_at(x, y) {
                    warn!("Cannot spawn at ({:.1}, {:.1}): {}", x, y, e);
                }
            }
            None => debug!("click at cell ({}, {}) is outside the canvas", mouse.column, mouse.row),
        }
    }

    /// Replay scripted clicks due this frame, then tick.
    fn step(&mut self) {
        while self.next_click < self.clicks.len()
            && self.clicks[self.next_click].frame <= self.sim.frame()
        {
            let click = self.clicks[self.next_click];
            if let Err(e) = self.sim.spawn_at(click.x, click.y) {
                warn!("Click at ({}, {}) ignored: {}", click.x, click.y, e);
            }
            self.next_click += 1;
        }

        let report = self.sim.tick();
        self.collisions += report.hits.len() as u64;
    }
}

/// Execute the live command.
pub fn cmd_live(args: &[String]) -> Result<(), String> {
    let mut scene_path: Option<&str> = None;
    let mut seed: Option<u64> = None;
    let mut axes = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let value = flag_value(args, i, "--seed")?;
                seed = Some(value.parse().map_err(|_| format!("Invalid seed: {}", value))?);
            }
            "--axes" => {
                axes = true;
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            path if !path.starts_with('-') => {
                if scene_path.is_none() {
                    scene_path = Some(path);
                }
            }
            unknown => {
                return Err(format!("Unknown option: {}", unknown));
            }
        }
        i += 1;
    }

    let mut scene = load_scene(scene_path)?;
    if seed.is_some() {
        scene.seed = seed;
    }
    if axes {
        scene.show_axes = true;
    }

    let mut app = App {
        sim: scene.build()?,
        clicks: scene.scheduled_clicks(u64::MAX),
        next_click: 0,
        latch: ClickLatch::new(),
        canvas_area: Rect::default(),
        collisions: 0,
        paused: false,
        should_quit: false,
    };
    let frame_time = Duration::from_millis(scene.frame_ms.max(1));

    enable_raw_mode().map_err(|e| e.to_string())?;
    let guard = RestoreOnDrop::new(restore_terminal);
    stdout().execute(EnterAlternateScreen).map_err(|e| e.to_string())?;
    stdout().execute(EnableMouseCapture).map_err(|e| e.to_string())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| e.to_string())?;

    let result = run_app(&mut terminal, &mut app, frame_time);
    drop(guard);

    println!(
        "{} circles after {} frames, {} collisions",
        app.sim.len(),
        app.sim.frame(),
        app.collisions
    );
    result
}

/// Runs `restore` when dropped, so every exit after raw mode is enabled
/// (including a failed setup step) hands back a usable terminal.
struct RestoreOnDrop<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> RestoreOnDrop<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Best effort: every step runs even if an earlier one fails.
fn restore_terminal() {
    if let Err(e) = stdout().execute(DisableMouseCapture) {
        warn!("Failed to disable mouse capture: {}", e);
    }
    if let Err(e) = disable_raw_mode() {
        warn!("Failed to leave raw mode: {}", e);
    }
    if let Err(e) = stdout().execute(LeaveAlternateScreen) {
        warn!("Failed to leave alternate screen: {}", e);
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    frame_time: Duration,
) -> Result<(), String> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| ui(frame, app)).map_err(|_| "Draw error".to_string())?;

        let timeout = frame_time.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).map_err(|e| e.to_string())? {
            match event::read().map_err(|e| e.to_string())? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        app.should_quit = true;
                    }
                    KeyCode::Char('a') => {
                        let show = !app.sim.show_axes();
                        app.sim.set_show_axes(show);
                    }
                    KeyCode::Char('c') => {
                        app.sim.clear();
                    }
                    KeyCode::Char(' ') => {
                        app.paused = !app.paused;
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= frame_time {
            if !app.paused {
                app.step();
            }
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(frame.area());

    let block = Block::default()
        .title(" rebound ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    app.canvas_area = block.inner(layout[0]);

    let area = app.canvas_area;
    let sim = &app.sim;
    let bounds = *sim.bounds();
    let widget = canvas::Canvas::default()
        .block(block)
        .background_color(Color::White)
        .marker(Marker::Braille)
        .x_bounds([bounds.top_left().x(), bounds.bottom_right().x()])
        .y_bounds([bounds.bottom_right().y(), bounds.top_left().y()])
        .paint(move |ctx| {
            let mut canvas = TerminalCanvas::new(ctx, area, &bounds);
            sim.render(&mut canvas);
        });
    frame.render_widget(widget, layout[0]);

    let status = format!(
        " frame {}  circles {}  hits {}{}   [click] add  [a]xes  [c]lear  [space] pause  [q]uit",
        app.sim.frame(),
        app.sim.len(),
        app.collisions,
        if app.paused { "  PAUSED" } else { "" }
    );
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        layout[1],
    );
}

fn print_usage() {
    eprintln!("rebound live - Interactive bouncing circles (default command)");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    rebound [live] [scene.yaml] [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    --seed <n>    Seed for spawned circles");
    eprintln!("    --axes        Start with axes shown");
    eprintln!();
    eprintln!("KEYS:");
    eprintln!("    click         Add a circle");
    eprintln!("    a             Toggle axes");
    eprintln!("    c             Remove all circles");
    eprintln!("    space         Pause");
    eprintln!("    q, Esc        Quit");
}
