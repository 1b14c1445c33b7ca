use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::Constraint,
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block as BlockWidget, Clear, Padding, Paragraph},
};
use ratatui_runtime::{Runtime, Screen, ScreenTransition};
use slidetoe_engine::WinningLine;

use crate::command::play::view::PlayView;

/// What acknowledging the message leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledge {
    /// Return to the screen below.
    Dismiss,
    /// Quit the program.
    Exit,
}

/// Blocking message drawn over the board until the user acknowledges it.
#[derive(Debug)]
pub struct NotificationScreen {
    title: &'static str,
    message: String,
    color: Color,
    on_acknowledge: Acknowledge,
    backdrop: PlayView,
}

impl NotificationScreen {
    pub fn rejected_move(message: String, backdrop: PlayView) -> Self {
        Self {
            title: "Invalid move",
            message,
            color: Color::Red,
            on_acknowledge: Acknowledge::Dismiss,
            backdrop,
        }
    }

    pub fn win(line: &WinningLine, on_acknowledge: Acknowledge, backdrop: PlayView) -> Self {
        Self {
            title: "Game over",
            message: format!("{} has won the game!", line.mark),
            color: Color::Green,
            on_acknowledge,
            backdrop,
        }
    }

    fn acknowledge(&self) -> ScreenTransition {
        tracing::debug!(message = %self.message, "notification acknowledged");
        match self.on_acknowledge {
            Acknowledge::Dismiss => ScreenTransition::Pop,
            Acknowledge::Exit => ScreenTransition::Exit,
        }
    }
}

impl Screen for NotificationScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.request_render();
    }

    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        let acknowledged = match event {
            Event::Key(key) => {
                key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc)
            }
            Event::Mouse(mouse) => mouse.kind == MouseEventKind::Down(MouseButton::Left),
            _ => false,
        };
        if acknowledged {
            self.acknowledge()
        } else {
            ScreenTransition::Stay
        }
    }

    fn after_render(&mut self, _runtime: &mut Runtime) -> ScreenTransition {
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        self.backdrop.draw(frame);

        let width = u16::try_from(self.message.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(8)
            .max(32);
        let popup = frame
            .area()
            .centered(Constraint::Length(width), Constraint::Length(6));
        let block = BlockWidget::bordered()
            .title(Line::from(self.title).centered())
            .border_style(Style::new().fg(self.color))
            .padding(Padding::symmetric(1, 0));
        let text = Text::from(vec![
            Line::styled(self.message.as_str(), Style::new().fg(self.color)),
            Line::default(),
            Line::styled("Press Enter to continue", Style::new().fg(Color::DarkGray)),
        ])
        .centered();

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(text).block(block), popup);
    }
}
