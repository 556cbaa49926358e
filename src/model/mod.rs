//! Output record types for one decomposed message.

pub mod file;
pub mod message;

pub use file::ExtractedFile;
pub use message::DecomposedMessage;
