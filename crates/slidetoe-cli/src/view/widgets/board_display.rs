use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block as BlockWidget, BorderType, Widget},
};
use slidetoe_engine::{BoardState, CellCoord, GRID_SIZE, Mark, WinningLine};

use crate::config::GameConfig;

const CELL_WIDTH: u16 = 9;
const CELL_HEIGHT: u16 = 5;
const GRID_CELLS: usize = GRID_SIZE.unsigned_abs() as usize;

/// The 3×3 board, one bordered box per cell.
///
/// Each box is titled with its cell key. Optional overlays: the keyboard
/// cursor, the mark that the player to move will lose next, and the
/// winning line.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a BoardState,
    config: &'a GameConfig,
    cursor: Option<CellCoord>,
    next_eviction: Option<CellCoord>,
    winning_line: Option<&'a WinningLine>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a BoardState, config: &'a GameConfig) -> Self {
        Self {
            board,
            config,
            cursor: None,
            next_eviction: None,
            winning_line: None,
        }
    }

    pub fn cursor(self, cursor: CellCoord) -> Self {
        Self {
            cursor: Some(cursor),
            ..self
        }
    }

    pub fn next_eviction(self, coord: Option<CellCoord>) -> Self {
        Self {
            next_eviction: coord,
            ..self
        }
    }

    pub fn winning_line(self, line: Option<&'a WinningLine>) -> Self {
        Self {
            winning_line: line,
            ..self
        }
    }

    pub const fn width() -> u16 {
        CELL_WIDTH * GRID_SIZE.unsigned_abs() as u16
    }

    pub const fn height() -> u16 {
        CELL_HEIGHT * GRID_SIZE.unsigned_abs() as u16
    }

    /// Returns the cell drawn at terminal position `(column, row)` when the
    /// board is rendered into `area`.
    pub fn cell_at(area: Rect, column: u16, row: u16) -> Option<CellCoord> {
        let position = Position::new(column, row);
        let cells = cell_areas(area);
        CellCoord::all().find(|coord| {
            grid_index(*coord).is_some_and(|(r, c)| cells[r][c].contains(position))
        })
    }

    fn cell_style(&self, coord: CellCoord, mark: Option<Mark>) -> (Style, Style) {
        let mut border = Style::new().fg(Color::DarkGray);
        let mut content = match mark {
            Some(Mark::Cross) => Style::new().fg(Color::Cyan),
            Some(Mark::Circle) => Style::new().fg(Color::Magenta),
            None => Style::new(),
        }
        .add_modifier(Modifier::BOLD);

        if self.next_eviction == Some(coord) {
            content = content.add_modifier(Modifier::DIM);
        }
        if self.winning_line.is_some_and(|line| line.contains(coord)) {
            border = border.fg(Color::Green);
            content = content.fg(Color::Green);
        }
        if self.cursor == Some(coord) {
            border = border.fg(Color::Yellow);
        }
        (border, content)
    }
}

fn grid_index(coord: CellCoord) -> Option<(usize, usize)> {
    let row = usize::try_from(coord.row()).ok()?;
    let col = usize::try_from(coord.col()).ok()?;
    (row < GRID_CELLS && col < GRID_CELLS).then_some((row, col))
}

fn cell_areas(area: Rect) -> [[Rect; GRID_CELLS]; GRID_CELLS] {
    let vertical = Layout::vertical([Constraint::Length(CELL_HEIGHT); GRID_CELLS]).flex(Flex::Center);
    let horizontal =
        Layout::horizontal([Constraint::Length(CELL_WIDTH); GRID_CELLS]).flex(Flex::Center);
    vertical
        .areas::<GRID_CELLS>(area)
        .map(|row| horizontal.areas::<GRID_CELLS>(row))
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cells = cell_areas(area);
        for coord in CellCoord::all() {
            let Some((r, c)) = grid_index(coord) else {
                continue;
            };
            let cell_area = cells[r][c];
            let mark = self.board.get(coord);
            let (border_style, content_style) = self.cell_style(coord, mark);

            let border_type = if self.cursor == Some(coord) {
                BorderType::Thick
            } else {
                BorderType::Rounded
            };
            let block = BlockWidget::bordered()
                .border_type(border_type)
                .border_style(border_style)
                .title(Line::from(coord.to_string()).style(Style::new().fg(Color::DarkGray)));
            let inner = block.inner(cell_area);
            block.render(cell_area, buf);

            if let Some(mark) = mark {
                let [middle] = Layout::vertical([Constraint::Length(1)])
                    .flex(Flex::Center)
                    .areas(inner);
                Line::from(self.config.glyph(mark))
                    .style(content_style)
                    .centered()
                    .render(middle, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(0, 0, BoardDisplay::width(), BoardDisplay::height())
    }

    #[test]
    fn test_cell_at_maps_cell_boxes() {
        let area = area();
        assert_eq!(BoardDisplay::cell_at(area, 0, 0), Some(CellCoord::new(0, 0)));
        assert_eq!(
            BoardDisplay::cell_at(area, CELL_WIDTH + 1, 2),
            Some(CellCoord::new(0, 1))
        );
        assert_eq!(
            BoardDisplay::cell_at(area, 2 * CELL_WIDTH, 2 * CELL_HEIGHT + 4),
            Some(CellCoord::new(2, 2))
        );
        assert_eq!(BoardDisplay::cell_at(area, 3 * CELL_WIDTH, 0), None);
    }

    #[test]
    fn test_cell_at_follows_centering() {
        let area = Rect::new(0, 0, BoardDisplay::width() + 10, BoardDisplay::height());
        assert_eq!(BoardDisplay::cell_at(area, 0, 0), None);
        assert_eq!(BoardDisplay::cell_at(area, 5, 0), Some(CellCoord::new(0, 0)));
    }

    #[test]
    fn test_renders_glyphs_in_cells() {
        let mut board = BoardState::new();
        board.apply_move(CellCoord::new(1, 1), Mark::Cross).unwrap();
        board.apply_move(CellCoord::new(0, 2), Mark::Circle).unwrap();
        let config = GameConfig::default();

        let mut buf = Buffer::empty(area());
        BoardDisplay::new(&board, &config).render(area(), &mut buf);

        // Glyphs are centered in their boxes.
        let center = |r: u16, c: u16| (c * CELL_WIDTH + CELL_WIDTH / 2, r * CELL_HEIGHT + CELL_HEIGHT / 2);
        let (x, y) = center(1, 1);
        assert_eq!(buf[(x, y)].symbol(), "X");
        let (x, y) = center(0, 2);
        assert_eq!(buf[(x, y)].symbol(), "O");
        let (x, y) = center(2, 0);
        assert_eq!(buf[(x, y)].symbol(), " ");
    }
}
