//! Folio UI - Presentation layer
//!
//! This crate turns user intents into render state. Each screen exposes a
//! `transform` that takes named input event streams and returns named output
//! channels, driven by one task per activation.
//!
//! Rendering is left to the host; the host only forwards events and draws
//! whatever arrives on the output channels.

pub mod navigator;
pub mod screen;
pub mod state;

pub use navigator::{Navigator, NavigatorRef};
pub use screen::{
    Activation, DetailInput, DetailOutput, DetailScreen, EventStream, ListInput, ListOutput,
    ListScreen, LoginInput, LoginOutput, LoginScreen, from_receiver, no_events,
};
pub use state::{ArticleItem, DetailState, ListState};
