//! Configuration section definitions.
//!
//! Each module corresponds to a top-level field of the descriptor:
//!
//! | Module    | Field          | Purpose                              |
//! |-----------|----------------|--------------------------------------|
//! | `content` | `content`      | Globs scanned for utility classes    |
//! | `plugins` | `plugins`      | Engine plugin module handles         |
//! | `theme`   | `theme.extend` | Additive design-token extensions     |

pub mod content;
pub mod plugins;
pub mod theme;

pub use plugins::PluginHandle;
pub use theme::{ThemeConfig, ThemeExtensions, TokenValue};
