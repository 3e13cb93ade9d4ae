//! # Senryu - Vertical Poem Card Renderer
//!
//! Renders a three-line senryu and its author as vertical columns of text
//! inside a two-tone bordered card, and serves the result over HTTP.
//!
//! ## Quick Start
//!
//! ```no_run
//! use senryu::{RenderConfig, Senryu, composer};
//!
//! let poem = Senryu::new("ふるいけや", "かわずとびこむ", "みずのおと", "ばしょう")?;
//! let card = composer::render(&poem, &RenderConfig::default())?;
//! card.save_png("card.png")?;
//!
//! # Ok::<(), senryu::SenryuError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`composer`] | Card layout: columns, borders, caption |
//! | [`layout`] | Vertical and horizontal text placement |
//! | [`canvas`] | RGBA canvas, rectangles, paste, PNG encoding |
//! | [`font`] | TTF loading, metrics, shared font cache |
//! | [`config`] | Optional overrides and their defaults |
//! | [`server`] | HTTP front end |
//! | [`error`] | Error types |
//!
//! ## Limitations
//!
//! Columns never wrap. A sentence with more characters than fit between the
//! margins runs off the bottom of the card instead of failing.

pub mod canvas;
pub mod color;
pub mod composer;
pub mod config;
pub mod error;
pub mod font;
pub mod layout;
pub mod senryu;
pub mod server;

// Re-exports for convenience
pub use canvas::{Canvas, Surface};
pub use color::{Color, Point};
pub use config::{CardConfig, RenderConfig};
pub use error::SenryuError;
pub use senryu::Senryu;
