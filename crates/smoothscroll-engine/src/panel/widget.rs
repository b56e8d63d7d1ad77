use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use smoothscroll_core::schema::{Control, Section, SETTINGS};

use super::state::SettingsPanel;
use crate::theme::Theme;

/// Width reserved for setting names
const NAME_WIDTH: usize = 30;

pub struct SettingsPanelWidget;

impl SettingsPanelWidget {
    pub fn render(frame: &mut Frame, panel: &SettingsPanel, theme: &Theme) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // Settings
                Constraint::Length(4), // Description
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self::render_list(frame, chunks[0], panel, theme);
        Self::render_description(frame, chunks[1], panel, theme);
        Self::render_status(frame, chunks[2], panel, theme);
    }

    fn render_list(frame: &mut Frame, area: Rect, panel: &SettingsPanel, theme: &Theme) {
        let block = Block::default()
            .title(" Smooth scrolling ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));

        let mut lines = Vec::new();
        let mut section: Option<Section> = None;
        let mut selected_line = 0;

        for (index, def) in SETTINGS.iter().enumerate() {
            if section != Some(def.section) {
                if section.is_some() {
                    lines.push(Line::from(""));
                }
                section = Some(def.section);
                lines.push(Line::from(Span::styled(
                    def.section.title(),
                    Style::default()
                        .fg(theme.heading)
                        .add_modifier(Modifier::BOLD),
                )));
            }

            let selected = index == panel.selected();
            if selected {
                selected_line = lines.len();
            }
            let row_style = if selected {
                Style::default().bg(theme.selection)
            } else {
                Style::default()
            };

            let value = panel.display_value(def);
            let value_style = match (def.control, value.as_str()) {
                (Control::Toggle, "on") => Style::default().fg(theme.enabled),
                (Control::Toggle, _) => Style::default().fg(theme.disabled),
                _ => Style::default().fg(theme.value),
            };

            let marker = if selected { "> " } else { "  " };
            lines.push(
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.accent)),
                    Span::styled(
                        format!("{:<width$}", def.name, width = NAME_WIDTH),
                        Style::default().fg(theme.fg0),
                    ),
                    Span::styled(control_text(def.control, &value), value_style),
                ])
                .style(row_style),
            );
        }

        // Keep the selected row visible on short terminals
        let visible = area.height.saturating_sub(2) as usize;
        let scroll = (selected_line + 1).saturating_sub(visible) as u16;

        let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_description(frame: &mut Frame, area: Rect, panel: &SettingsPanel, theme: &Theme) {
        let def = panel.selected_def();
        let range = match def.control {
            Control::Slider { min, max, .. } => format!("Range {} to {}", min, max),
            Control::Dropdown { options } => format!("One of: {}", options.join(", ")),
            Control::Toggle => "On or off".to_string(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg1));

        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(def.description, Style::default().fg(theme.fg0))),
            Line::from(Span::styled(range, Style::default().fg(theme.grey1))),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_status(frame: &mut Frame, area: Rect, panel: &SettingsPanel, theme: &Theme) {
        let line = match panel.status_message() {
            Some(message) => Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(theme.error).bg(theme.bg2),
            )),
            None => Line::from(Span::styled(
                " j/k:move h/l:adjust H/L:x10 enter:toggle r:reset q:quit ",
                Style::default().fg(theme.grey1).bg(theme.bg2),
            )),
        };
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg2)), area);
    }
}

/// Value column: sliders get a small gauge
fn control_text(control: Control, value: &str) -> String {
    match control {
        Control::Slider { min, max, .. } => {
            let current: f64 = value.parse().unwrap_or(min);
            let ratio = if max > min {
                ((current - min) / (max - min)).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let filled = (ratio * 10.0).round() as usize;
            format!(
                "[{}{}] {}",
                "#".repeat(filled),
                "-".repeat(10 - filled),
                value
            )
        }
        Control::Toggle => format!("[{}]", value),
        Control::Dropdown { .. } => format!("< {} >", value),
    }
}
