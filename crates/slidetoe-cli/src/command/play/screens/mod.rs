pub use self::board::BoardScreen;

mod board;
mod notification;
