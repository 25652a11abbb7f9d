//! Gridpad entrypoint.
//!
//! Synchronous single-threaded loop: block on one terminal event, translate
//! it to an action, dispatch it, redraw when the dispatcher says the frame
//! is dirty. The document loads at startup and saves once at exit.

use anyhow::Result;
use clap::Parser;
use core_actions::dispatcher::dispatch;
use core_actions::{io_ops, translate_key, translate_mouse};
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent};
use core_state::{EditorState, Geometry};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind,
};
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{cursor, execute, queue, style::Print};
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "gridpad", version, about = "Fixed-grid wrapping text pad")]
struct Args {
    /// Document stem to open; the backing file is `<stem>.txt`. Defaults to
    /// the configured stem.
    pub stem: Option<String>,
    /// Optional configuration file path (overrides discovery of `gridpad.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("gridpad.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "gridpad.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        Err(_err) => {
            // Global tracing subscriber already installed; drop guard so writer shuts down.
            None
        }
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn convert_key(key: crossterm::event::KeyEvent) -> Option<KeyEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let code = match key.code {
        crossterm::event::KeyCode::Char(c) => KeyCode::Char(c),
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm::event::KeyCode::Up => KeyCode::Up,
        crossterm::event::KeyCode::Down => KeyCode::Down,
        crossterm::event::KeyCode::Left => KeyCode::Left,
        crossterm::event::KeyCode::Right => KeyCode::Right,
        _ => return None,
    };
    let mut mods = KeyModifiers::empty();
    if key
        .modifiers
        .contains(crossterm::event::KeyModifiers::CONTROL)
    {
        mods |= KeyModifiers::CTRL;
    }
    if key.modifiers.contains(crossterm::event::KeyModifiers::ALT) {
        mods |= KeyModifiers::ALT;
    }
    if key
        .modifiers
        .contains(crossterm::event::KeyModifiers::SHIFT)
    {
        mods |= KeyModifiers::SHIFT;
    }
    Some(KeyEvent { code, mods })
}

/// Terminal mouse events arrive in cells; the pointer action speaks window
/// pixels, so the cell is scaled back up by the configured character cell.
fn convert_mouse(mouse: crossterm::event::MouseEvent, geometry: Geometry) -> Option<MouseEvent> {
    let button = match mouse.kind {
        MouseEventKind::Down(crossterm::event::MouseButton::Left) => MouseButton::Left,
        MouseEventKind::Down(crossterm::event::MouseButton::Middle) => MouseButton::Middle,
        MouseEventKind::Down(crossterm::event::MouseButton::Right) => MouseButton::Right,
        _ => return None,
    };
    Some(MouseEvent {
        button,
        pixel_x: u32::from(mouse.column) * geometry.cell_width,
        pixel_y: u32::from(mouse.row) * geometry.cell_height,
    })
}

fn read_input(geometry: Geometry) -> Result<Option<InputEvent>> {
    Ok(match event::read()? {
        Event::Key(key) => convert_key(key).map(InputEvent::Key),
        Event::Mouse(mouse) => convert_mouse(mouse, geometry).map(InputEvent::Mouse),
        _ => None,
    })
}

fn draw(state: &EditorState) -> Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;
    for (row, line) in core_render::visible_lines(state).iter().enumerate() {
        queue!(out, cursor::MoveTo(0, row as u16), Print(&line.text))?;
    }
    let (col, row) = core_render::cursor_cell(state);
    queue!(out, cursor::MoveTo(col as u16, row as u16))?;
    out.flush()?;
    Ok(())
}

fn run_loop(state: &mut EditorState) -> Result<()> {
    draw(state)?;
    loop {
        let Some(input) = read_input(state.geometry)? else {
            continue;
        };
        let action = match input {
            InputEvent::Key(key) => translate_key(&key),
            InputEvent::Mouse(mouse) => translate_mouse(&mouse),
        };
        let Some(action) = action else {
            continue;
        };
        let result = dispatch(action, state);
        if result.quit {
            break;
        }
        if result.dirty {
            draw(state)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = core_config::load_from(args.config.clone())?;
    let geometry = Geometry::from_window(
        config.file.window.width,
        config.file.window.height,
        config.file.font.char_width,
        config.file.font.char_height,
    )?;

    let stem = args.stem.unwrap_or_else(|| config.file.document.stem.clone());
    let path = io_ops::document_path(&stem);
    let buffer = io_ops::load_document(&path, geometry.wrap_width);
    let mut state = EditorState::new(buffer, geometry);
    state.file_name = Some(path.clone());
    info!(
        target: "runtime",
        path = %path.display(),
        rows = state.total_lines(),
        wrap_width = geometry.wrap_width,
        viewport_rows = geometry.viewport_rows,
        "bootstrap_complete"
    );

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let loop_result = run_loop(&mut state);
    execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    loop_result?;

    if io_ops::save_document(&mut state) != io_ops::SaveResult::Success {
        warn!(target: "runtime", "exit_save_failed");
    }
    info!(target: "runtime", "shutdown");
    Ok(())
}
