//! # Core Application Logic
//!
//! This module contains Natter's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • validate (input)     │
//!                    │  • Transcript           │
//!                    │  • Dispatcher           │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │ Responders │
//!          │  Adapter   │                │  (reply)   │
//!          │ (ratatui)  │                │            │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`validate`]: input rules, `ValidText`
//! - [`message`]: `Message`, `Role`, the append-only `Transcript`
//! - [`dispatch`]: which responder the send action is bound to
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`config`]: `~/.natter/config.toml` and override resolution

pub mod action;
pub mod config;
pub mod dispatch;
pub mod message;
pub mod state;
pub mod validate;
