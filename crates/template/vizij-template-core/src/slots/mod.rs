//! Slot-based template substitution.
//!
//! A slot manifest declares named substitution points and their kind. The
//! [`SlotManager`] wraps caller-supplied collaborators with slottable variants that
//! bind those slots to the handles and image loads seen during one build, then
//! exposes setters that swap content at runtime.

mod manager;
mod manifest;
mod observer;
mod provider;

pub use manager::SlotManager;
pub use manifest::{SlotInfo, SlotManifest, SlotType};
pub use observer::SlottablePropertyObserver;
pub use provider::SlottableResourceProvider;
