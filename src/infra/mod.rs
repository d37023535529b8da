mod cli;
mod client_error;
mod config;

pub use cli::Cli;
pub use client_error::ClientError;
pub use config::{
    DatabaseSettings, PaymentSettings, ServerSettings, SessionSettings, Settings,
    get_config_settings,
};
