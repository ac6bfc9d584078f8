use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::core::route::Route;
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub fn render_home(f: &mut Frame, app: &App) {
    let theme = Theme::default();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(Paragraph::new(app.route().title()).style(theme.title_style()), chunks[0]);

    let body = match app.route() {
        Route::NotFound(_) => Paragraph::new("This page does not exist.").style(theme.muted_style()),
        _ => Paragraph::new("Welcome back.").style(theme.normal_style()),
    };
    f.render_widget(body, chunks[1]);

    match app.toast_message() {
        Some(t) => f.render_widget(Paragraph::new(t).style(theme.toast_style()), chunks[2]),
        None => f.render_widget(Paragraph::new("q=quit").style(theme.muted_style()), chunks[2]),
    }
}
