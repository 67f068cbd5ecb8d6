//! Password generation from a small set of user constraints, plus clipboard export.
//!
//! Options flow into an [`Alphabet`], a [`PasswordSampler`] draws from it, and a
//! [`PasswordController`] keeps the displayed password in step with the options.

pub mod alphabet;
pub mod clipboard;
pub mod controller;
pub mod errors;
pub mod options;
pub mod sampler;
mod tests;

pub use alphabet::{Alphabet, build_alphabet};
pub use clipboard::{ClipboardBackend, ClipboardExporter, DeniedClipboard, DisplayField, MemoryClipboard, SystemClipboard};
pub use controller::{ControllerState, PasswordChanged, PasswordController};
pub use errors::{ClipboardError, KeysmithError};
pub use options::{GenerationOptions, LengthBounds};
pub use sampler::{PasswordSampler, generate_password};
