//! PSI-MI Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared building blocks for the PSI-MI interaction model.
//!
//! # Overview
//!
//! - **Error Handling**: construction errors raised by the entity model
//! - **Checksums**: SEGUID, ROGID, RIGID and CRC64 content identifiers
//! - **Vocabulary**: the controlled-vocabulary terms matched throughout the model
//! - **Logging**: tracing subscriber setup
//!
//! # Example
//!
//! ```
//! use psimi_common::checksum::rogid;
//!
//! let id = rogid("MAAAA", 4932).unwrap();
//! assert_eq!(id, "IZPXYnJCj4F1aDVfrqSitEOEPP44932");
//! ```

pub mod checksum;
pub mod error;
pub mod logging;
pub mod vocabulary;

// Re-export commonly used types
pub use error::{PsiError, Result};
pub use vocabulary::Term;
