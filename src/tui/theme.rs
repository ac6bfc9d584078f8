use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Debug)]
pub struct Theme {
    pub fg: Color,
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            primary: Color::Blue,
            accent: Color::Red,
            muted: Color::DarkGray,
            success: Color::Green,
        }
    }
}

impl Theme {
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }
    pub fn normal_style(&self) -> Style { Style::default().fg(self.fg) }
    pub fn muted_style(&self) -> Style { Style::default().fg(self.muted) }
    pub fn button_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.primary).add_modifier(Modifier::BOLD)
    }
    pub fn alert_style(&self) -> Style { Style::default().fg(self.accent).add_modifier(Modifier::BOLD) }
    pub fn toast_style(&self) -> Style { Style::default().fg(self.success).add_modifier(Modifier::BOLD) }
}
