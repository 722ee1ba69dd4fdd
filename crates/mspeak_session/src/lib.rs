//! Cross-expression memory for one reading session: defined symbols,
//! document structure and the current topic.

pub mod effects;
pub mod fingerprint;
pub mod memory;
pub mod structure;

pub use effects::MemoryEffect;
pub use fingerprint::Fingerprint;
pub use memory::{ContextMemory, SymbolEntry, MAX_STRUCTURE_DEPTH};
pub use structure::{FrameState, MismatchedClose, StructureFrame, StructureKind};
