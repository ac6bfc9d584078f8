use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;
use crate::tui::theme::Theme;

/// Modal notice drawn over the current view.
pub fn render_alert(f: &mut Frame, app: &App) {
    let Some(msg) = app.alert_message() else {
        return;
    };
    let theme = Theme::default();
    let outer = f.area();
    let width = 50.min(outer.width);
    let height = 5.min(outer.height);
    let area = Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    };

    let text = format!("{msg}\n\n[Enter] OK");
    let para = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(theme.alert_style())
        .block(Block::default().borders(Borders::ALL).title("Alert"));
    f.render_widget(Clear, area);
    f.render_widget(para, area);
}
