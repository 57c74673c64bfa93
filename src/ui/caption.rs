use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::speech::CaptionFeed;

/// On-screen stand-in for the speech sink: recent announcements oldest
/// first, the current line highlighted.
pub struct CaptionArea<'a> {
    feed: &'a CaptionFeed,
}

impl<'a> CaptionArea<'a> {
    pub fn new(feed: &'a CaptionFeed) -> Self {
        Self { feed }
    }
}

impl Widget for CaptionArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Spoken ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<&str> = self.feed.recent().collect();
        let visible = lines.len().min(inner.height as usize);
        let start = lines.len() - visible;

        let rendered: Vec<Line> = lines[start..]
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let is_current = start + i + 1 == lines.len();
                let style = if is_current {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(Span::styled(*text, style))
            })
            .collect();

        Paragraph::new(rendered).render(inner, buf);
    }
}
