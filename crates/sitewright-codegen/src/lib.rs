//! # Sitewright Codegen
//!
//! The Server Code Synthesizer: turns a validated action catalog into a
//! runnable tool-server package on disk. Deliberately thin - template
//! substitution, `actions.json` emission, and a context file recording what
//! was generated. All correctness decisions happened upstream in discovery.

mod context;
mod error;
mod synthesizer;

pub use context::{ContextEntry, ContextFile};
pub use error::CodegenError;
pub use synthesizer::{GeneratedServer, Synthesizer};
