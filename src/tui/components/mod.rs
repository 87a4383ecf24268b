//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: top status bar with responder and status
//! - `Message`: one transcript entry
//! - `Alert`: modal notice overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: text input with responder indicator
//! - `MessageList`: scrollable transcript with layout caching
//!
//! Components receive external data as props (fields or parameters), never by
//! reaching into global state.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── message.rs       (Single message renderer)
//! ├── message_list.rs  (Scrollable message container)
//! ├── alert.rs         (Modal notice)
//! └── input_box/       (Text input)
//! ```

pub mod alert;
pub mod input_box;
pub mod message;
pub mod message_list;
mod title_bar;

pub use alert::{Alert, AlertEvent, AlertKeys};
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
