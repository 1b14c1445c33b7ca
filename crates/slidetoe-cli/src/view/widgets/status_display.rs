use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use slidetoe_engine::{GameSession, LIVE_MARK_LIMIT, Mark, SessionState};

use crate::config::GameConfig;

/// Turn counter, whose move it is, and how many marks each player has left
/// before the sliding window kicks in.
#[derive(Debug)]
pub struct StatusDisplay<'a> {
    session: &'a GameSession,
    config: &'a GameConfig,
}

impl<'a> StatusDisplay<'a> {
    pub fn new(session: &'a GameSession, config: &'a GameConfig) -> Self {
        Self { session, config }
    }

    fn headline(&self) -> Line<'a> {
        let mark = self.session.current_mark();
        let glyph = self.config.glyph(mark);
        match self.session.state() {
            SessionState::AwaitingMove => Line::from(vec![
                Span::raw(format!("Turn {} · ", self.session.turn() + 1)),
                Span::styled(
                    format!("{mark} ({glyph})"),
                    Style::new().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" to move"),
            ]),
            SessionState::AwaitingEvaluation(_) => {
                Line::from(format!("Turn {} · {mark} ({glyph}) played", self.session.turn() + 1))
            }
            SessionState::Finished(line) => Line::styled(
                format!("{} ({}) has won the game!", line.mark, self.config.glyph(line.mark)),
                Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        }
    }

    fn live_marks(&self, mark: Mark) -> Line<'a> {
        let placed = self.session.board().live_marks(mark).len();
        let glyph = self.config.glyph(mark);
        let slots: Vec<_> = (0..LIVE_MARK_LIMIT)
            .map(|i| {
                if i < placed {
                    Span::raw(format!("{glyph} "))
                } else {
                    Span::styled("· ", Style::new().fg(Color::DarkGray))
                }
            })
            .collect();
        let mut spans = vec![Span::raw(format!("{:>6}: ", mark.to_string()))];
        spans.extend(slots);
        Line::from(spans)
    }
}

impl Widget for StatusDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            self.headline().centered(),
            self.live_marks(Mark::Cross).centered(),
            self.live_marks(Mark::Circle).centered(),
        ];
        Paragraph::new(lines).render(area, buf);
    }
}
