use crate::app::Screen;
use crate::models::{Season, SeasonInfo, SEASON_FOOTNOTE};
use crate::ui::components::NavBar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct SeasonScreen<'a> {
    pub season: Season,
    pub crop: &'a str,
}

impl<'a> SeasonScreen<'a> {
    pub fn new(season: Season, crop: &'a str) -> Self {
        Self { season, crop }
    }
}

impl Widget for SeasonScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(8),    // Seasons
                Constraint::Length(1), // Footnote
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Season Guidance", Theme::title()),
            Span::styled(format!(" - current: {}", self.season), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        for (season, column) in Season::ALL.iter().zip(columns.iter()) {
            self.render_season(SeasonInfo::for_season(*season), *column, buf);
        }

        Paragraph::new(Span::styled(SEASON_FOOTNOTE, Theme::dim())).render(chunks[2], buf);
        NavBar::new(Screen::Season).render(chunks[3], buf);
    }
}

impl SeasonScreen<'_> {
    fn render_season(&self, info: &SeasonInfo, area: Rect, buf: &mut Buffer) {
        let current = info.season == self.season;
        let block = Block::default()
            .title(Span::styled(
                format!("{} Season", info.season),
                if current { Theme::title() } else { Theme::header() },
            ))
            .borders(Borders::ALL)
            .border_style(if current {
                Theme::border_focused()
            } else {
                Theme::border()
            });

        let mut lines = Vec::new();
        for (label, value) in info.lines() {
            lines.push(Line::from(Span::styled(label, Theme::dim())));
            lines.push(Line::from(Span::styled(value, Theme::normal())));
            lines.push(Line::from(""));
        }

        if current && !info.is_common_crop(self.crop) {
            lines.push(Line::from(Span::styled(
                format!("{} is not a common {} crop", self.crop, info.season),
                Theme::warning(),
            )));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
