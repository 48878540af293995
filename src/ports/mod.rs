//! Port traits between the parser core and the outside world.

pub mod config_port;
pub mod line_port;
pub mod report_port;
