use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use badgesmith::app::{App, Field, StatusLevel};
use badgesmith::config;
use badgesmith::infrastructure::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
use badgesmith::ui;

#[derive(Debug, Parser)]
#[command(
    name = "badgesmith",
    version,
    about = "Badgesmith: build crypto balance-badge URLs in the terminal"
)]
struct Args {
    /// Badge image service base (e.g. https://badges.example/badge)
    #[arg(long)]
    badge_base: Option<String>,

    /// Explorer viewer base (e.g. https://badges.example/scanner)
    #[arg(long)]
    explorer_base: Option<String>,

    /// Chain-metadata document URL (defaults to chainid.network)
    #[arg(long)]
    chainlist_url: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = config::load();
    if let Some(base) = args.badge_base.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        config.badge_base_url = base;
    }
    if let Some(base) = args
        .explorer_base
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        config.explorer_base_url = base;
    }
    if let Some(url) = args
        .chainlist_url
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        config.chainlist_url = url;
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create the runtime bridge and kick off the one registry load
    let runtime = RuntimeBridge::new(config.chainlist_url.clone())?;
    runtime.send(RuntimeCommand::FetchChains)?;

    let mut app = App::new(config.service_bases());
    app.set_status("Loading networks…", StatusLevel::Info);

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        match event {
            RuntimeEvent::ChainsLoaded(chains) => app.apply_chains_loaded(chains),
            RuntimeEvent::ChainsFailed { message } => app.apply_chains_failed(message),
        }
    }

    if let Some(text) = app.take_copy_request() {
        copy_to_clipboard(app, text);
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('y') => app.request_copy(),
            _ => {}
        }
        return;
    }

    if app.chain_picker_open {
        match key.code {
            KeyCode::Esc => app.close_chain_picker(),
            KeyCode::Enter => app.picker_confirm(),
            KeyCode::Up => app.picker_move(false),
            KeyCode::Down => app.picker_move(true),
            KeyCode::Backspace => app.backspace(),
            KeyCode::Char(ch) => app.input_char(ch),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Left => app.cycle_value(false),
        KeyCode::Right => app.cycle_value(true),
        KeyCode::Enter => {
            if app.focus == Field::Chain {
                app.open_chain_picker();
            } else {
                app.cycle_value(true);
            }
        }
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(ch) => app.input_char(ch),
        _ => {}
    }
}

fn copy_to_clipboard(app: &mut App, text: String) {
    use arboard::Clipboard;

    match Clipboard::new() {
        Ok(mut clipboard) => {
            if clipboard.set_text(&text).is_ok() {
                let preview = if text.chars().count() > 32 {
                    let head: String = text.chars().take(32).collect();
                    format!("{head}…")
                } else {
                    text
                };
                app.set_status(format!("Copied: {preview}"), StatusLevel::Info);
            } else {
                app.set_status("Failed to copy to clipboard", StatusLevel::Error);
            }
        }
        Err(_) => {
            app.set_status("Clipboard not available", StatusLevel::Error);
        }
    }
}
