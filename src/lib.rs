pub mod config;
pub mod describe;
pub mod diff;
pub mod page;
pub mod session;
