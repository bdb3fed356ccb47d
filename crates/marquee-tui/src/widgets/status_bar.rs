use marquee_core::{PlaybackState, Snapshot};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme::Theme;

const HELP_HINT: &str = " space:pause s:start/stop r:reverse +/-:rate [/]:gap h:hover q:quit ";

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        frame.render_widget(Paragraph::new(Self::line(app, area.width)), area);
    }

    fn line(app: &App, width: u16) -> Line<'static> {
        let theme = &app.theme;
        let state = app.marquee.state();

        let badge = Span::styled(
            format!(" {} ", state.label()),
            Style::default()
                .fg(theme.bg0)
                .bg(state_color(theme, state))
                .add_modifier(Modifier::BOLD),
        );

        let status_text = match (&app.status_message, app.marquee.snapshot()) {
            (Some(msg), _) => format!(" {}", msg),
            (None, Some(snapshot)) => describe(&snapshot),
            (None, None) => " inactive".to_string(),
        };

        let used = badge.width() + status_text.width() + HELP_HINT.width();
        let padding = (width as usize).saturating_sub(used);

        Line::from(vec![
            badge,
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding), Style::default().bg(theme.bg2)),
            Span::styled(HELP_HINT, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ])
    }
}

fn state_color(theme: &Theme, state: PlaybackState) -> ratatui::style::Color {
    match state {
        PlaybackState::Running => theme.running,
        PlaybackState::Paused => theme.paused,
        PlaybackState::Stopped => theme.stopped,
    }
}

fn describe(snapshot: &Snapshot) -> String {
    let period = match snapshot.tile_distance {
        Some(distance) => format!("{:.0}", distance),
        None => "static".to_string(),
    };
    let hover = if snapshot.hovered { " | hovered" } else { "" };
    format!(
        " offset {:.1} | period {} | {}/s | gap {} | {:?}{}",
        snapshot.offset, period, snapshot.rate, snapshot.gap, snapshot.direction, hover
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TextRegion;
    use marquee_core::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &App) -> String {
        let backend = TestBackend::new(120, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| StatusBarWidget::render(frame, frame.area(), app))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect()
    }

    fn app() -> App {
        let mut config = AppConfig::default();
        config.marquee.gap = 2.0;
        let mut app = App::new(
            TextRegion::from_items("hello|world", "|"),
            config,
            Theme::default(),
        );
        app.resize(Rect::new(0, 0, 120, 10));
        app
    }

    #[test]
    fn test_inactive() {
        let text = rendered(&app());
        assert!(text.contains("STOPPED"));
        assert!(text.contains("inactive"));
    }

    #[test]
    fn test_running_snapshot() {
        let mut app = app();
        app.activate().unwrap();
        let text = rendered(&app);
        assert!(text.contains("RUNNING"));
        assert!(text.contains("period 14"));
        assert!(text.contains("80/s"));
        assert!(text.contains("q:quit"));
    }

    #[test]
    fn test_status_message_wins() {
        let mut app = app();
        app.activate().unwrap();
        app.set_status("rate: 90/s");
        assert!(rendered(&app).contains("rate: 90/s"));
    }

    #[test]
    fn test_hint_stays_right_aligned_with_wide_message() {
        let mut app = app();
        app.activate().unwrap();
        app.set_status("速度: 快");
        assert!(rendered(&app).ends_with("q:quit "));
    }
}
