use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
};
use slidetoe_engine::{CellCoord, GRID_SIZE, GameSession};

use crate::{
    config::GameConfig,
    view::widgets::{BoardDisplay, KeyBinding, StatusDisplay, help_line},
};

const KEY_BINDINGS: &[KeyBinding] = &[
    (&["Click", "Enter", "Space"], "Place"),
    (&["←↑↓→", "hjkl"], "Move"),
    (&["1-9"], "Place at"),
    (&["q", "Esc"], "Quit"),
];

/// Everything drawn on the game screen: the session, settings and cursor.
///
/// Cloned into notifications so they can show the board behind the message.
#[derive(Debug, Clone)]
pub struct PlayView {
    pub session: GameSession,
    pub config: GameConfig,
    pub cursor: CellCoord,
}

impl PlayView {
    pub fn new(config: GameConfig) -> Self {
        Self {
            session: GameSession::new(),
            config,
            cursor: CellCoord::new(GRID_SIZE / 2, GRID_SIZE / 2),
        }
    }

    /// Moves the cursor, staying on the board.
    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let row = (self.cursor.row() + d_row).clamp(0, GRID_SIZE - 1);
        let col = (self.cursor.col() + d_col).clamp(0, GRID_SIZE - 1);
        self.cursor = CellCoord::new(row, col);
    }

    /// Area the board occupies when the view is drawn into `area`.
    pub fn board_area(area: Rect) -> Rect {
        Self::layout(area)[2]
    }

    fn layout(area: Rect) -> [Rect; 4] {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(BoardDisplay::height()),
            Constraint::Length(1),
        ])
        .spacing(1)
        .flex(Flex::Center)
        .areas(area)
    }

    pub fn draw(&self, frame: &mut Frame) {
        let [title_area, status_area, board_area, help_area] = Self::layout(frame.area());

        let title = Line::styled(
            "Sliding Tic-Tac-Toe",
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        )
        .centered();
        let next_eviction = self
            .session
            .state()
            .is_awaiting_move()
            .then(|| {
                self.session
                    .board()
                    .next_eviction(self.session.current_mark())
            })
            .flatten();
        let board = BoardDisplay::new(self.session.board(), &self.config)
            .cursor(self.cursor)
            .next_eviction(next_eviction)
            .winning_line(self.session.winning_line());

        frame.render_widget(title, title_area);
        frame.render_widget(StatusDisplay::new(&self.session, &self.config), status_area);
        frame.render_widget(board, board_area);
        frame.render_widget(help_line(KEY_BINDINGS), help_area);
    }
}
