use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tracing::info;

use marquee_core::AppConfig;
use marquee_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    load_theme,
    widgets::{MarqueeWidget, StatusBarWidget},
    App, TextRegion,
};

pub async fn run(config: AppConfig, text: &str, separator: &str) -> Result<()> {
    let region = TextRegion::from_items(text, separator);
    let theme = load_theme(&config.ui);
    let event_handler = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);
    let mut app = App::new(region, config, theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle("marquee")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &event_handler);
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, events: &EventHandler) -> Result<()> {
    let size = terminal.size()?;
    app.resize(Rect::new(0, 0, size.width, size.height));
    app.activate()?;
    info!(text = %app.marquee.surface().primary_text(), "marquee running");

    // Main loop
    loop {
        app.update(Instant::now());
        terminal.draw(|frame| draw(frame, app))?;

        // Frame rate while moving, idle tick rate otherwise
        let event = if app.is_animating() {
            events.next_animation()?
        } else {
            events.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key)),
                AppEvent::PointerMoved(column, row) => app.pointer_moved(column, row),
                AppEvent::PointerLeft => app.pointer_left(),
                AppEvent::Resize(w, h) => app.resize(Rect::new(0, 0, w, h)),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg0)), area);

    let Some(screen) = app.screen else {
        return;
    };
    MarqueeWidget::render(frame, screen.band, app.marquee.surface(), &app.theme);
    if let Some(status) = screen.status {
        StatusBarWidget::render(frame, status, app);
    }
}
