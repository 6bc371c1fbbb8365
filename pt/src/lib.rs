//! PromptTemplate - memoized prompt rendering
//!
//! Renders terminal prompt text from small Handlebars templates. Templates can
//! call helpers for icons and ANSI colors; each distinct template source is
//! compiled once per cache and reused by every later render, across threads.
//!
//! # Architecture
//!
//! ```text
//! render(source, data)
//!   └── get_or_compile(source)
//!         ├── hit:  read lock → clone handle
//!         └── miss: insert slot → compile once (no map lock) → share
//!   └── execute(compiled, data) with the HelperRegistry bound
//! ```
//!
//! # Example
//!
//! ```ignore
//! use prompttemplate::{ColorMode, HelperRegistry, IconSet, TemplateCache};
//!
//! let cache = TemplateCache::new(HelperRegistry::standard(&IconSet::plain(), ColorMode::Enabled));
//! let line = cache.render(
//!     "{{color \"green+hb\"}}{{QuestionIcon}} {{color \"reset\"}}{{message}}",
//!     &serde_json::json!({"message": "Continue?"}),
//! )?;
//! ```

mod cache;
pub mod cli;
pub mod color;
pub mod config;
mod error;
pub mod icons;
mod registry;

pub use cache::{CacheStats, CompiledTemplate, TemplateCache};
pub use color::{ColorMode, color_code};
pub use error::{PromptError, PromptResult};
pub use icons::{Icon, IconSet};
pub use registry::{Helper, HelperFn, HelperRegistry, HelperRegistryBuilder};
