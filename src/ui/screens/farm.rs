use crate::app::{FarmField, Screen};
use crate::ui::components::NavBar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct FarmScreen<'a> {
    pub values: Vec<(FarmField, String)>,
    pub focused_field: FarmField,
    pub editing: bool,
    pub edit_buffer: &'a str,
    pub districts: &'a [String],
    pub crops: &'a [String],
}

impl<'a> FarmScreen<'a> {
    pub fn new(values: Vec<(FarmField, String)>) -> Self {
        Self {
            values,
            focused_field: FarmField::District,
            editing: false,
            edit_buffer: "",
            districts: &[],
            crops: &[],
        }
    }

    pub fn with_focus(mut self, field: FarmField) -> Self {
        self.focused_field = field;
        self
    }

    pub fn editing(mut self, editing: bool, buffer: &'a str) -> Self {
        self.editing = editing;
        self.edit_buffer = buffer;
        self
    }

    pub fn with_options(mut self, districts: &'a [String], crops: &'a [String]) -> Self {
        self.districts = districts;
        self.crops = crops;
        self
    }

    fn help_text(&self) -> String {
        match self.focused_field {
            FarmField::District if self.districts.is_empty() => {
                "No districts available from the rainfall data".to_string()
            }
            FarmField::District => format!("Options: {}", self.districts.join(", ")),
            FarmField::Crop => format!("Options: {}", self.crops.join(", ")),
            FarmField::Season => "Options: Kharif, Rabi".to_string(),
            FarmField::Area => "Enter farm area in hectares (must be greater than zero)".to_string(),
            FarmField::Irrigation => {
                "Options: Flood (100% water use), Sprinkler (75%), Drip (60%)".to_string()
            }
            FarmField::Groundwater => {
                "Options: Low, Medium, High, or the district's official status when a groundwater dataset is loaded"
                    .to_string()
            }
            FarmField::SoilMoisture => "Options: Low, Medium, High".to_string(),
        }
    }
}

impl Widget for FarmScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(23),   // Form (7 fields * 3 lines + borders)
                Constraint::Length(4), // Help
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Farm", Theme::title()),
            Span::styled(" - inputs for the water budget", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_form(chunks[1], buf);
        self.render_help(chunks[2], buf);

        let hints: &[(&str, &str)] = if self.editing {
            &[("[Enter]", "Apply"), ("[Esc]", "Cancel")]
        } else {
            &[("[↑↓]", "Field"), ("[←→]", "Change"), ("[Enter]", "Edit Area")]
        };
        NavBar::new(Screen::Farm).hints(hints).render(chunks[3], buf);
    }
}

impl FarmScreen<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Farm Inputs")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let constraints: Vec<Constraint> = self
            .values
            .iter()
            .map(|_| Constraint::Length(3))
            .collect();

        let field_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, (field, value)) in self.values.iter().enumerate() {
            let is_focused = *field == self.focused_field;

            let value = if is_focused && self.editing {
                format!("{}_", self.edit_buffer)
            } else if is_focused && *field != FarmField::Area {
                format!("◀ {} ▶", value)
            } else {
                value.clone()
            };

            let border_style = if is_focused {
                Theme::border_focused()
            } else {
                Theme::border()
            };

            let value_style = if is_focused && self.editing {
                Theme::highlight()
            } else if is_focused {
                Theme::selected()
            } else {
                Theme::normal()
            };

            let field_block = Block::default()
                .title(field.label())
                .borders(Borders::ALL)
                .border_style(border_style);

            let field_inner = field_block.inner(field_areas[i]);
            field_block.render(field_areas[i], buf);

            Paragraph::new(Span::styled(value, value_style)).render(field_inner, buf);
        }
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Field Options")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        Paragraph::new(Span::styled(self.help_text(), Theme::dim()))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
