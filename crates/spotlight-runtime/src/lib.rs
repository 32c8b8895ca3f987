#![forbid(unsafe_code)]

//! Showcase runtime.
//!
//! # Role in Spotlight
//! `spotlight-runtime` owns the showcase's mutable lifetime: the single
//! writer of the step sequence, the tickers of the active step, the tooltip
//! layout, and the configuration that tunes all of it.
//!
//! # Primary responsibilities
//! - **ShowcaseController**: start/next/finish, per-frame ticking, pointer
//!   routing, bubble measurement, and overlay painting.
//! - **Navigator**: deferred transitions requested from click handlers.
//! - **BoundsRegistry**: latest absolute rectangle per host region.
//! - **ShowcaseConfig**: tunables with validation and, behind the `config`
//!   feature, TOML/JSON loading.
//!
//! # How it fits in the system
//! The controller is the only stateful piece the host talks to. Everything
//! it composes lives in `spotlight-widgets` as pure functions or small
//! state objects, so the algorithms stay testable without a controller.

pub mod bounds;
pub mod config;
pub mod controller;
pub mod navigator;

pub use bounds::BoundsRegistry;
pub use config::{ConfigError, ShowcaseConfig};
pub use controller::ShowcaseController;
pub use navigator::{NavRequest, Navigator};
