//! Folio - console host for the articles reader
//!
//! Wires configuration, adapters, use cases and screens together. The
//! [`MainCoordinator`] owns the screen stack and implements navigation; the
//! console forwards stdin commands to it and prints whatever the screens
//! render.

pub mod config;
pub mod console;
pub mod coordinator;
pub mod factory;

pub use config::{AppConfig, ConfigError};
pub use console::{Command, CommandError, describe};
pub use coordinator::{Intent, MainCoordinator, Render, ScreenKind};
pub use factory::{ApplicationFactory, FactoryError};
