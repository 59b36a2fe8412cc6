//! TUI widgets for serplot.

mod footer;
mod header;
mod help;
mod panel;
mod popup;
mod quit_confirm;

pub use footer::render_footer;
pub use header::render_header;
pub use help::render_help;
pub use panel::render_panel;
pub use quit_confirm::render_quit_confirm;
