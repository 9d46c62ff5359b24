//! Dashboard layout: global header, one card per light, key help footer.
//!
//! Pure function of the [`Model`]; nothing here mutates state.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, LineGauge, Paragraph};
use ratatui::Frame;

use super::state::{LightEntry, Model};
use crate::cli::report::format_on_off;
use crate::models::color_temp::{MAX_BRIGHTNESS, MAX_KELVIN, MIN_KELVIN};

const CARD_HEIGHT: u16 = 4;

const HELP: &str =
    "↑/k ↓/j select · enter toggle · g all · +/- brightness · n/m temperature · r refresh · q quit";

const ON_COLOR: Color = Color::Yellow;
const OFF_COLOR: Color = Color::DarkGray;
const ERROR_COLOR: Color = Color::Red;
const SELECTED_COLOR: Color = Color::Cyan;

fn power_style(power: bool) -> Style {
    let color = if power { ON_COLOR } else { OFF_COLOR };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn ratio(value: f64, min: f64, max: f64) -> f64 {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

pub fn render(frame: &mut Frame, model: &Model) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header, model);
    render_lights(frame, body, model);
    frame.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
        footer,
    );
}

fn render_header(frame: &mut Frame, area: Rect, model: &Model) {
    let global = model.global_on();
    let line = Line::from(vec![
        Span::raw(" All lights: "),
        Span::styled(format_on_off(global), power_style(global)),
        Span::raw(format!("   ({} configured)", model.lights().len())),
    ]);
    let block = Block::default()
        .title(" Key Lights ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_lights(frame: &mut Frame, area: Rect, model: &Model) {
    if model.lights().is_empty() {
        frame.render_widget(Paragraph::new(" No lights configured."), area);
        return;
    }

    // Scroll so the selected card stays visible.
    let visible = usize::from((area.height / CARD_HEIGHT).max(1));
    let offset = model.cursor().saturating_sub(visible - 1);

    let slots = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible]).split(area);
    for (slot, (index, light)) in slots
        .iter()
        .zip(model.lights().iter().enumerate().skip(offset))
    {
        render_card(frame, *slot, light, index == model.cursor());
    }
}

fn render_card(frame: &mut Frame, area: Rect, light: &LightEntry, selected: bool) {
    let state = &light.state;

    let mut title = vec![
        Span::raw(format!(" {} ", light.device.name)),
        Span::styled(format!("[{}]", format_on_off(state.power)), power_style(state.power)),
        Span::raw(" "),
    ];
    if let Some(kind) = light.error {
        title.push(Span::styled(
            format!("! {} ", kind.message()),
            Style::default().fg(ERROR_COLOR),
        ));
    }

    let border = if selected {
        Style::default().fg(SELECTED_COLOR)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [brightness_area, temperature_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

    let brightness = LineGauge::default()
        .line_set(symbols::line::THICK)
        .filled_style(Style::default().fg(ON_COLOR))
        .unfilled_style(Style::default().fg(OFF_COLOR))
        .label(format!("Brightness  {:>3}% ", state.brightness))
        .ratio(ratio(
            f64::from(state.brightness),
            0.0,
            f64::from(MAX_BRIGHTNESS),
        ));
    frame.render_widget(brightness, brightness_area);

    let temperature = LineGauge::default()
        .line_set(symbols::line::THICK)
        .filled_style(Style::default().fg(Color::LightBlue))
        .unfilled_style(Style::default().fg(OFF_COLOR))
        .label(format!("Temperature {:>4}K ", state.temperature_kelvin))
        .ratio(ratio(
            f64::from(state.temperature_kelvin),
            f64::from(MIN_KELVIN),
            f64::from(MAX_KELVIN),
        ));
    frame.render_widget(temperature, temperature_area);
}
