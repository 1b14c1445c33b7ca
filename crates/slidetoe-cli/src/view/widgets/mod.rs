pub use self::{board_display::*, help_line::*, status_display::*};

mod board_display;
mod help_line;
mod status_display;
