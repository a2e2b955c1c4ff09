pub mod engine;
pub mod policy;

pub use policy::{ClosedExtension, ExtensionPolicy, FrequentExtension};
