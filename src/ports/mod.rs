// src/ports/mod.rs
pub mod browse;
pub mod terminal;

pub use browse::BrowseSession;
pub use terminal::TerminalPresenter;
