use crate::app::{AssistantState, Screen};
use crate::logic::messages;
use crate::ui::components::{InputWidget, NavBar};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct AssistantScreen<'a> {
    pub state: &'a AssistantState,
    pub analyzing_text: &'a str,
    pub status_message: Option<&'a str>,
}

impl<'a> AssistantScreen<'a> {
    pub fn new(state: &'a AssistantState, analyzing_text: &'a str) -> Self {
        Self {
            state,
            analyzing_text,
            status_message: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for AssistantScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Question
                Constraint::Min(6),    // Reply
                Constraint::Length(1), // Status
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("AI Assistant", Theme::title()),
            Span::styled(
                format!(" - answering in {}", self.state.language),
                Theme::dim(),
            ),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        InputWidget::new("Your question", &self.state.input)
            .placeholder("Press [i] to type a question in English or हिंदी")
            .focused(self.state.typing)
            .render(chunks[1], buf);

        self.render_reply(chunks[2], buf);

        if let Some(msg) = self.status_message {
            Paragraph::new(Span::styled(msg, Theme::warning())).render(chunks[3], buf);
        }

        let hints: &[(&str, &str)] = if self.state.typing {
            &[("[Enter]", "Ask"), ("[Esc]", "Cancel")]
        } else {
            &[("[i]", "Type"), ("[v]", "Voice"), ("[l]", "Language")]
        };
        NavBar::new(Screen::Assistant)
            .hints(hints)
            .render(chunks[4], buf);
    }
}

impl AssistantScreen<'_> {
    fn render_reply(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Advisory", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let lines: Vec<Line> = if self.state.is_analyzing() {
            vec![Line::from(Span::styled(self.analyzing_text, Theme::highlight()))]
        } else if let Some(reply) = &self.state.reply {
            let mut lines: Vec<Line> = reply
                .text
                .lines()
                .map(|l| Line::from(Span::styled(l, Theme::normal())))
                .collect();
            if !reply.categories.is_empty() {
                lines.push(Line::from(""));
                let mut spans = vec![Span::styled("Topics: ", Theme::dim())];
                for category in &reply.categories {
                    spans.push(Span::styled(
                        format!("{} ", category),
                        Style::default().fg(category.color()),
                    ));
                }
                lines.push(Line::from(spans));
            }
            lines
        } else {
            vec![Line::from(Span::styled(
                messages::NO_INPUT_PROMPT.get(self.state.language),
                Theme::dim(),
            ))]
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
