use std::cell::Cell;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{Frame, layout::Rect};
use ratatui_runtime::{FrameBarrier, Runtime, Screen, ScreenTransition};
use slidetoe_engine::{CellCoord, InvalidMove, MoveOutcome};

use super::notification::{Acknowledge, NotificationScreen};
use crate::{
    command::play::view::PlayView,
    config::{GameConfig, OnWin},
    view::widgets::BoardDisplay,
};

/// Frames drawn between placing a mark and checking it for a win.
///
/// The first frame shows the new mark, the second one is the earliest point
/// at which it is guaranteed to be on screen.
const EVALUATION_DELAY_FRAMES: u64 = 2;

const FRAME_RATE: f64 = 60.0;

/// The game board: takes moves and evaluates them once they are on screen.
#[derive(Debug)]
pub struct BoardScreen {
    view: PlayView,
    pending: Option<FrameBarrier>,
    frame_area: Cell<Rect>,
}

impl BoardScreen {
    pub fn new(config: GameConfig) -> Self {
        Self {
            view: PlayView::new(config),
            pending: None,
            frame_area: Cell::new(Rect::default()),
        }
    }

    fn restart(&mut self) {
        tracing::info!("starting a new game");
        self.view = PlayView::new(self.view.config.clone());
        self.pending = None;
    }

    fn place(&mut self, runtime: &mut Runtime, coord: CellCoord) -> ScreenTransition {
        self.view.cursor = coord;
        match self.view.session.play(coord) {
            Ok(_placed) => {
                self.pending = Some(FrameBarrier::after_frames(
                    runtime,
                    EVALUATION_DELAY_FRAMES,
                ));
                runtime.request_render();
                ScreenTransition::Stay
            }
            Err(err @ InvalidMove::AlreadyPlayed { .. }) => ScreenTransition::Push(Box::new(
                NotificationScreen::rejected_move(err.to_string(), self.view.clone()),
            )),
            Err(err) => {
                tracing::debug!(%coord, %err, "move ignored");
                ScreenTransition::Stay
            }
        }
    }

    fn handle_key(&mut self, runtime: &mut Runtime, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return ScreenTransition::Exit,
            KeyCode::Left | KeyCode::Char('h') => self.view.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.view.move_cursor(0, 1),
            KeyCode::Up | KeyCode::Char('k') => self.view.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.view.move_cursor(1, 0),
            KeyCode::Enter | KeyCode::Char(' ') => return self.place(runtime, self.view.cursor),
            KeyCode::Char(c) => {
                if let Some(coord) = c.to_digit(10).and_then(CellCoord::from_keypad) {
                    return self.place(runtime, coord);
                }
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn evaluate(&mut self, runtime: &mut Runtime) -> ScreenTransition {
        self.pending = None;
        runtime.request_render();
        match self.view.session.evaluate() {
            Some(MoveOutcome::Won(line)) => {
                let on_acknowledge = match self.view.config.on_win {
                    OnWin::Restart => Acknowledge::Dismiss,
                    OnWin::Exit => Acknowledge::Exit,
                };
                ScreenTransition::Push(Box::new(NotificationScreen::win(
                    &line,
                    on_acknowledge,
                    self.view.clone(),
                )))
            }
            Some(MoveOutcome::Continue { .. }) | None => ScreenTransition::Stay,
        }
    }
}

impl Screen for BoardScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_frame_rate(FRAME_RATE);
        if self.view.session.state().is_finished() {
            self.restart();
        }
        runtime.request_render();
    }

    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(runtime, *key),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let board_area = PlayView::board_area(self.frame_area.get());
                match BoardDisplay::cell_at(board_area, mouse.column, mouse.row) {
                    Some(coord) => self.place(runtime, coord),
                    None => ScreenTransition::Stay,
                }
            }
            _ => ScreenTransition::Stay,
        }
    }

    fn after_render(&mut self, runtime: &mut Runtime) -> ScreenTransition {
        let Some(barrier) = self.pending else {
            return ScreenTransition::Stay;
        };
        if barrier.is_released(runtime) {
            self.evaluate(runtime)
        } else {
            runtime.request_render();
            ScreenTransition::Stay
        }
    }

    fn draw(&self, frame: &mut Frame) {
        self.frame_area.set(frame.area());
        self.view.draw(frame);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::{Terminal, backend::TestBackend};
    use ratatui_runtime::App;
    use slidetoe_engine::{Mark, SessionState};

    use super::*;

    /// Drives a single [`BoardScreen`] and records the transitions it asks for.
    #[derive(Debug)]
    struct Host {
        screen: BoardScreen,
        transitions: Vec<ScreenTransition>,
    }

    impl Host {
        fn new(config: GameConfig) -> Self {
            Self {
                screen: BoardScreen::new(config),
                transitions: vec![],
            }
        }

        fn send(&mut self, runtime: &mut Runtime, event: &Event) {
            let transition = self.screen.handle_event(runtime, event);
            self.transitions.push(transition);
        }

        fn key(&mut self, runtime: &mut Runtime, code: KeyCode) {
            self.send(runtime, &Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        }

        fn take_transitions(&mut self) -> Vec<ScreenTransition> {
            std::mem::take(&mut self.transitions)
                .into_iter()
                .filter(|t| !matches!(t, ScreenTransition::Stay))
                .collect()
        }
    }

    impl App for Host {
        fn init(&mut self, runtime: &mut Runtime) {
            self.screen.on_active(runtime);
        }

        fn should_exit(&self) -> bool {
            false
        }

        fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
            self.send(runtime, &event);
        }

        fn draw(&self, frame: &mut Frame) {
            self.screen.draw(frame);
        }

        fn after_render(&mut self, runtime: &mut Runtime) {
            let transition = self.screen.after_render(runtime);
            self.transitions.push(transition);
        }
    }

    fn render(terminal: &mut Terminal<TestBackend>, runtime: &mut Runtime, host: &mut Host) {
        terminal.draw(|frame| host.draw(frame)).unwrap();
        runtime.finish_frame(host);
    }

    fn setup() -> (Terminal<TestBackend>, Runtime, Host) {
        let terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut runtime = Runtime::new();
        let mut host = Host::new(GameConfig::default());
        host.init(&mut runtime);
        (terminal, runtime, host)
    }

    /// Places a mark with the keypad and draws until it has been evaluated.
    fn play_keypad(
        terminal: &mut Terminal<TestBackend>,
        runtime: &mut Runtime,
        host: &mut Host,
        key: char,
    ) {
        host.key(runtime, KeyCode::Char(key));
        for _ in 0..EVALUATION_DELAY_FRAMES {
            render(terminal, runtime, host);
        }
    }

    #[test]
    fn test_evaluation_waits_for_two_frames() {
        let (mut terminal, mut runtime, mut host) = setup();

        host.key(&mut runtime, KeyCode::Char('5'));
        assert!(host.screen.view.session.state().is_awaiting_evaluation());
        assert_eq!(
            host.screen.view.session.board().get(CellCoord::new(1, 1)),
            Some(Mark::Cross)
        );

        render(&mut terminal, &mut runtime, &mut host);
        assert!(host.screen.view.session.state().is_awaiting_evaluation());

        render(&mut terminal, &mut runtime, &mut host);
        assert_eq!(host.screen.view.session.state(), &SessionState::AwaitingMove);
        assert_eq!(host.screen.view.session.current_mark(), Mark::Circle);
        assert!(host.take_transitions().is_empty());
    }

    #[test]
    fn test_moves_are_ignored_while_evaluation_is_pending() {
        let (mut terminal, mut runtime, mut host) = setup();

        host.key(&mut runtime, KeyCode::Char('1'));
        host.key(&mut runtime, KeyCode::Char('2'));
        assert_eq!(host.screen.view.session.board().occupied_count(), 1);
        assert!(host.take_transitions().is_empty());

        render(&mut terminal, &mut runtime, &mut host);
        render(&mut terminal, &mut runtime, &mut host);
        host.key(&mut runtime, KeyCode::Char('2'));
        assert_eq!(
            host.screen.view.session.board().get(CellCoord::new(0, 1)),
            Some(Mark::Circle)
        );
    }

    #[test]
    fn test_occupied_cell_opens_notification() {
        let (mut terminal, mut runtime, mut host) = setup();

        play_keypad(&mut terminal, &mut runtime, &mut host, '1');
        host.key(&mut runtime, KeyCode::Char('1'));

        let transitions = host.take_transitions();
        assert_eq!(transitions.len(), 1);
        assert!(matches!(transitions[0], ScreenTransition::Push(_)));
        assert_eq!(host.screen.view.session.current_mark(), Mark::Circle);
    }

    #[test]
    fn test_cursor_keys_and_enter_place_mark() {
        let (_terminal, mut runtime, mut host) = setup();

        host.key(&mut runtime, KeyCode::Up);
        host.key(&mut runtime, KeyCode::Char('h'));
        host.key(&mut runtime, KeyCode::Enter);

        assert_eq!(
            host.screen.view.session.board().get(CellCoord::new(0, 0)),
            Some(Mark::Cross)
        );
    }

    #[test]
    fn test_mouse_click_places_mark_under_pointer() {
        let (mut terminal, mut runtime, mut host) = setup();
        render(&mut terminal, &mut runtime, &mut host);

        // The board is centered horizontally within its area.
        let board_area = PlayView::board_area(Rect::new(0, 0, 80, 30));
        let board_right = board_area.x + (board_area.width + BoardDisplay::width()) / 2;
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: board_right - 3,
            row: board_area.y + BoardDisplay::height() - 2,
            modifiers: KeyModifiers::NONE,
        });
        host.send(&mut runtime, &click);

        assert_eq!(
            host.screen.view.session.board().get(CellCoord::new(2, 2)),
            Some(Mark::Cross)
        );
        assert_eq!(host.screen.view.cursor, CellCoord::new(2, 2));
    }

    #[test]
    fn test_win_pushes_notification_and_restarts_on_return() {
        let (mut terminal, mut runtime, mut host) = setup();

        // X: 1, 5, 9 (main diagonal); O: 2, 3
        for key in ['1', '2', '5', '3'] {
            play_keypad(&mut terminal, &mut runtime, &mut host, key);
        }
        assert!(host.take_transitions().is_empty());

        host.key(&mut runtime, KeyCode::Char('9'));
        render(&mut terminal, &mut runtime, &mut host);
        assert!(host.take_transitions().is_empty());
        render(&mut terminal, &mut runtime, &mut host);

        let transitions = host.take_transitions();
        assert_eq!(transitions.len(), 1);
        assert!(matches!(transitions[0], ScreenTransition::Push(_)));
        assert!(host.screen.view.session.state().is_finished());
        assert_eq!(host.screen.view.session.turn(), 4);

        host.screen.on_active(&mut runtime);
        assert_eq!(host.screen.view.session.turn(), 0);
        assert_eq!(host.screen.view.session.board().occupied_count(), 0);
    }

    #[test]
    fn test_quit_keys_exit() {
        let (_terminal, mut runtime, mut host) = setup();
        host.key(&mut runtime, KeyCode::Char('q'));
        host.key(&mut runtime, KeyCode::Esc);

        let transitions = host.take_transitions();
        assert_eq!(transitions.len(), 2);
        assert!(
            transitions
                .iter()
                .all(|t| matches!(t, ScreenTransition::Exit))
        );
    }
}
