use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::panel::{PanelView, Tier};

/// Visual mirror of the active panel: current-level rows with a cursor
/// marker, plus the live type-ahead buffer when one is in progress.
pub struct PanelArea<'a> {
    view: &'a PanelView,
}

impl<'a> PanelArea<'a> {
    pub fn new(view: &'a PanelView) -> Self {
        Self { view }
    }
}

impl Widget for PanelArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let tier = match self.view.tier {
            Tier::Category => "categories",
            Tier::Item => "items",
            Tier::Content => "content",
        };
        let title = format!(" {} ({tier}) ", self.view.title);
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = self
            .view
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let selected = i == self.view.cursor;
                let marker = if selected { "> " } else { "  " };
                let style = if selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(format!("{marker}{row}"), style))
            })
            .collect();

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "  (empty)",
                Style::default().fg(Color::DarkGray),
            )));
        }

        if !self.view.search.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  search: {}", self.view.search),
                Style::default().fg(Color::Yellow),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
