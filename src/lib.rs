pub mod alerts;
pub mod bot_state;
pub mod config;
pub mod handlers;
pub mod models;
pub mod moltin;
pub mod session;
pub mod transport;
