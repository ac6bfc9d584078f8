use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::App;
use crate::tui::theme::Theme;

pub fn render_confirm(f: &mut Frame, app: &App) {
    let theme = Theme::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(3), // button
            Constraint::Min(0),    // status
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    let title = Paragraph::new(app.route().title()).style(theme.title_style());
    f.render_widget(title, chunks[0]);

    let button = Paragraph::new(" Click to confirm ")
        .alignment(Alignment::Center)
        .style(theme.button_style())
        .block(Block::default().borders(Borders::ALL));
    let width = 24.min(chunks[1].width);
    f.render_widget(button, Rect { width, ..chunks[1] });

    // The token is a credential; only say whether one is present
    let status = if app.is_pending() {
        "Confirming..."
    } else if app.token().is_none() {
        "No token in link"
    } else {
        ""
    };
    f.render_widget(Paragraph::new(status).style(theme.muted_style()), chunks[2]);

    let footer = "Enter/c=confirm  q=quit";
    f.render_widget(Paragraph::new(footer).style(theme.muted_style()), chunks[3]);
}
