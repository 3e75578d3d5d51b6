//! Property handles supplied by the engine during a build pass.
//!
//! A handle is an opaque get/set accessor bound to one property on one scene node.
//! The engine hands observers a [`LazyHandle`] so that handles are only built for
//! properties somebody actually keeps.

use std::cell::LazyCell;
use std::rc::Rc;

use crate::value::{ColorValue, OpacityValue, TextValue, TransformValue};

/// Accessor for a single animated property instance.
///
/// `set` takes `&self`: handles are shared between observers and the engine owns
/// the node state behind them.
pub trait PropertyHandle<V> {
    fn get(&self) -> V;
    fn set(&self, value: &V);
}

pub type SharedHandle<V> = Rc<dyn PropertyHandle<V>>;

pub type ColorPropertyHandle = SharedHandle<ColorValue>;
pub type OpacityPropertyHandle = SharedHandle<OpacityValue>;
pub type TransformPropertyHandle = SharedHandle<TransformValue>;
pub type TextPropertyHandle = SharedHandle<TextValue>;

type HandleFactory<'a, V> = Box<dyn FnOnce() -> SharedHandle<V> + 'a>;

/// Deferred handle construction.
///
/// The factory runs on the first [`LazyHandle::handle`] call and the result is
/// memoized; every observer that asks for the handle receives the same instance.
pub struct LazyHandle<'a, V> {
    cell: LazyCell<SharedHandle<V>, HandleFactory<'a, V>>,
}

impl<'a, V> LazyHandle<'a, V> {
    pub fn new(factory: impl FnOnce() -> SharedHandle<V> + 'a) -> Self {
        Self {
            cell: LazyCell::new(Box::new(factory) as HandleFactory<'a, V>),
        }
    }

    /// Materialize (once) and return the shared handle.
    pub fn handle(&self) -> SharedHandle<V> {
        Rc::clone(LazyCell::force(&self.cell))
    }
}
