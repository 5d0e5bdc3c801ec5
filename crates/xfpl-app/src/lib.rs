// xfpl-app: data acquisition, caching, report assembly and the app loop
// that connects them to the dashboard.

pub mod app;
pub mod cache;
pub mod fetch;
pub mod protocol;
pub mod report;
pub mod source;
