// Library root: exposes the dashboard so its view state and key handling
// can be tested outside the binary.

pub mod tui;
