//! The FIFI question-answering turn.
//!
//! 1. **Classify** the query against the static answer table
//! 2. **Retrieve** otherwise: rank corpus URLs and fetch the best few pages
//! 3. **Compose** system instructions, recent history, and the user turn
//! 4. **Complete** via the configured provider
//! 5. **Record** the exchange in the session history
//!
//! A provider failure becomes an apology reply rather than an error, so front
//! ends always have something to show.

pub mod assistant;
pub mod context;
pub mod prompt;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use assistant::{Assistant, Reply};
pub use context::{AssembledContext, ContextAssembler, ContextSource};
pub use prompt::{PromptComposer, SYSTEM_PROMPT};
