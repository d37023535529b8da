mod session_sweeper;
mod web_server;

pub use session_sweeper::SessionSweeper;
pub use web_server::WebServer;
