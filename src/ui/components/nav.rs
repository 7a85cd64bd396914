use crate::app::Screen;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const TABS: &[(&str, &str, Screen)] = &[
    ("[1]", "Water Budget ", Screen::Budget),
    ("[2]", "Assistant ", Screen::Assistant),
    ("[3]", "Season ", Screen::Season),
    ("[f]", "Farm ", Screen::Farm),
];

/// Tab strip plus screen-specific key hints.
pub struct NavBar<'a> {
    active: Screen,
    hints: &'a [(&'a str, &'a str)],
}

impl<'a> NavBar<'a> {
    pub fn new(active: Screen) -> Self {
        Self { active, hints: &[] }
    }

    pub fn hints(mut self, hints: &'a [(&'a str, &'a str)]) -> Self {
        self.hints = hints;
        self
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (key, label, screen) in TABS {
            spans.push(Span::styled(*key, Theme::nav_key()));
            let style = if *screen == self.active {
                Theme::nav_active()
            } else {
                Theme::nav_label()
            };
            spans.push(Span::styled(*label, style));
        }
        spans.push(Span::styled("│ ", Theme::dim()));
        for (key, label) in self.hints {
            spans.push(Span::styled(*key, Theme::nav_key()));
            spans.push(Span::styled(format!("{} ", label), Theme::nav_label()));
        }
        spans.push(Span::styled("[q]", Theme::nav_key()));
        spans.push(Span::styled("Quit", Theme::nav_label()));

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
