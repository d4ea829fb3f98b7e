pub mod terminal_screen;

pub use terminal_screen::TerminalScreen;
