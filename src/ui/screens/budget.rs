use crate::app::Screen;
use crate::models::{Advisory, FarmInput, SensorReading, WaterBudgetResult};
use crate::ui::components::{coverage_gauge, moisture_gauge, volume_gauge, NavBar};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct BudgetScreen<'a> {
    pub input: &'a FarmInput,
    pub result: Option<&'a WaterBudgetResult>,
    pub error: Option<&'a str>,
    pub advisories: &'a [Advisory],
    pub sensor: Option<&'a SensorReading>,
    pub use_sensor: bool,
    pub policy: &'a str,
    pub status_message: Option<&'a str>,
}

impl<'a> BudgetScreen<'a> {
    pub fn new(
        input: &'a FarmInput,
        result: Option<&'a WaterBudgetResult>,
        advisories: &'a [Advisory],
    ) -> Self {
        Self {
            input,
            result,
            error: None,
            advisories,
            sensor: None,
            use_sensor: false,
            policy: "margin",
            status_message: None,
        }
    }

    pub fn with_error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn with_sensor(mut self, sensor: Option<&'a SensorReading>, in_use: bool) -> Self {
        self.sensor = sensor;
        self.use_sensor = in_use;
        self
    }

    pub fn with_policy(mut self, policy: &'a str) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for BudgetScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Gauges row
                Constraint::Min(10),   // Budget and advisories
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);

        match self.result {
            Some(result) => {
                self.render_gauges(result, chunks[1], buf);

                let middle = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(chunks[2]);

                let left = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(10), Constraint::Length(8)])
                    .split(middle[0]);

                self.render_metrics(result, left[0], buf);
                self.render_chart(result, left[1], buf);
                self.render_advisories(middle[1], buf);
            }
            None => {
                let message = self.error.unwrap_or("No budget computed");
                let block = Block::default()
                    .title(Span::styled("Cannot compute budget", Theme::header()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Theme::ERROR));
                Paragraph::new(Span::styled(message, Theme::error()))
                    .block(block)
                    .wrap(Wrap { trim: true })
                    .render(chunks[1].union(chunks[2]), buf);
            }
        }

        if let Some(msg) = self.status_message {
            Paragraph::new(Span::styled(msg, Theme::success())).render(chunks[3], buf);
        }

        NavBar::new(Screen::Budget)
            .hints(&[
                ("[m]", "Sensor"),
                ("[u]", "Use Sensor"),
                ("[p]", "Policy"),
            ])
            .render(chunks[4], buf);
    }
}

impl BudgetScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            "AgriWater - {} | {} ({}) | {} ha",
            self.input.district, self.input.crop, self.input.season, self.input.area_hectares
        );

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let moisture_source = match (self.sensor, self.use_sensor) {
            (Some(reading), true) => format!(
                "sensor {:.1}% at {}",
                reading.moisture_percent,
                reading.taken_at.format("%H:%M:%S")
            ),
            _ => "selected".to_string(),
        };

        let info = format!(
            "{} irrigation | Groundwater: {} | Soil moisture: {} | Policy: {}",
            self.input.irrigation, self.input.groundwater, moisture_source, self.policy
        );
        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }

    fn render_gauges(&self, result: &WaterBudgetResult, area: Rect, buf: &mut Buffer) {
        let gauge_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let scale = result.available_m3.max(result.adjusted_demand_m3);
        volume_gauge("Available", Some(result.available_m3), scale, Theme::AVAILABLE)
            .render(gauge_chunks[0], buf);
        volume_gauge("Demand", Some(result.adjusted_demand_m3), scale, Theme::DEMAND)
            .render(gauge_chunks[1], buf);
        coverage_gauge("Coverage", result.available_m3, result.adjusted_demand_m3)
            .render(gauge_chunks[2], buf);
        moisture_gauge("Sensor", self.sensor.map(|s| s.moisture_percent))
            .render(gauge_chunks[3], buf);
    }

    fn render_metrics(&self, r: &WaterBudgetResult, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Water Budget", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let status_style = Style::default().fg(r.status.color());
        let mut lines = vec![
            metric("Rainfall", format!("{:.1} mm", r.rainfall_mm)),
            metric("Rain water", format!("{:.0} m³", r.rainfall_water_m3)),
            metric(
                "Groundwater",
                format!("{:.0} m³ (×{:.2})", r.groundwater_water_m3, r.groundwater_fraction),
            ),
            Line::from(vec![
                Span::styled(format!("{:<14}", "Demand"), Theme::dim()),
                Span::styled(format!("{:.0} m³ ", r.adjusted_demand_m3), Theme::normal()),
                Span::styled(
                    format!("({} moisture)", r.soil_moisture),
                    Style::default().fg(Theme::moisture_color(r.soil_moisture)),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<14}", "Balance"), Theme::dim()),
                Span::styled(format!("{:.0} m³ ", r.balance_m3), status_style),
                Span::styled(r.status.label(), status_style),
            ]),
        ];

        if let (Some(crop), Some(risk)) = (&r.recommended_crop, r.risk_level) {
            let crop_style = if r.crop_mismatch {
                Theme::warning()
            } else {
                Theme::success()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<14}", "Best crop"), Theme::dim()),
                Span::styled(crop.as_str(), crop_style),
            ]));
            lines.push(Line::from(vec![
                Span::styled(format!("{:<14}", "Risk"), Theme::dim()),
                Span::styled(risk.as_str(), Style::default().fg(risk.color())),
            ]));
        }

        if let Some(s) = &r.savings {
            lines.push(metric(
                "Saved vs flood",
                format!("{:.0} m³ ({:.0}%)", s.water_saved_m3, s.saving_percent),
            ));
        }

        for warning in &r.warnings {
            lines.push(Line::from(Span::styled(format!("⚠ {}", warning), Theme::warning())));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_chart(&self, r: &WaterBudgetResult, area: Rect, buf: &mut Buffer) {
        let bars = [
            Bar::default()
                .value(r.available_m3.max(0.0).round() as u64)
                .label(Line::from("Available"))
                .text_value(format!("{:.0}", r.available_m3))
                .style(Style::default().fg(Theme::AVAILABLE)),
            Bar::default()
                .value(r.adjusted_demand_m3.max(0.0).round() as u64)
                .label(Line::from("Demand"))
                .text_value(format!("{:.0}", r.adjusted_demand_m3))
                .style(Style::default().fg(Theme::DEMAND)),
        ];

        BarChart::default()
            .block(
                Block::default()
                    .title(Span::styled("Available vs Demand (m³)", Theme::header()))
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(10)
            .bar_gap(4)
            .render(area, buf);
    }

    fn render_advisories(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Advisories", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.advisories.is_empty() {
            Paragraph::new(Span::styled("No advisories", Theme::dim())).render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .advisories
            .iter()
            .map(|a| {
                let severity_style = Style::default().fg(a.severity.color());
                let mut lines = vec![
                    Line::from(vec![
                        Span::styled(format!("{} ", a.severity.symbol()), severity_style),
                        Span::styled(
                            format!("{:<9}", a.category.as_str()),
                            Style::default().fg(a.category.color()),
                        ),
                        Span::styled(&a.title, severity_style),
                    ]),
                    Line::from(vec![
                        Span::styled("  ", Theme::dim()),
                        Span::styled(&a.description, Theme::dim()),
                    ]),
                ];
                if let Some(action) = &a.suggested_action {
                    lines.push(Line::from(vec![
                        Span::styled("  → ", Theme::dim()),
                        Span::styled(action, Theme::normal()),
                    ]));
                }
                ListItem::new(lines)
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}

fn metric(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Theme::dim()),
        Span::styled(value, Theme::normal()),
    ])
}
