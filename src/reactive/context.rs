//! Scoped ambient values.
//!
//! `provide_context` makes a value available to everything rendered
//! within the lifetime of the returned [`ContextGuard`];
//! [`use_context`] reads the nearest provided value. Values are keyed by
//! type, so each `T` has at most one ambient value at a time.
//!
//! Providing a value inside an existing scope shadows the outer value
//! until the inner guard drops, which is what lets nested route scopes
//! nest: each level provides its own context and the previous one comes
//! back when the level finishes rendering.
//!
//! Storage is thread-local. WASM is single-threaded, and native tests
//! get per-thread isolation for free.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;

thread_local! {
	static CONTEXTS: RefCell<HashMap<TypeId, Box<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Guard that keeps a provided context value alive.
///
/// Dropping the guard restores whatever value (if any) was provided for
/// the same type before.
pub struct ContextGuard<T: 'static> {
	previous: Option<Box<dyn Any>>,
	_marker: PhantomData<T>,
}

impl<T: 'static> std::fmt::Debug for ContextGuard<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ContextGuard")
			.field("type", &std::any::type_name::<T>())
			.field("shadows_outer", &self.previous.is_some())
			.finish()
	}
}

impl<T: 'static> Drop for ContextGuard<T> {
	fn drop(&mut self) {
		let previous = self.previous.take();
		CONTEXTS.with(|contexts| {
			let mut map = contexts.borrow_mut();
			match previous {
				Some(value) => {
					map.insert(TypeId::of::<T>(), value);
				}
				None => {
					map.remove(&TypeId::of::<T>());
				}
			}
		});
	}
}

/// Provides an ambient value of type `T` for the lifetime of the guard.
///
/// # Example
///
/// ```ignore
/// use montgomery::{provide_context, use_context};
///
/// let _scope = provide_context("dark".to_string());
/// assert_eq!(use_context::<String>(), Some("dark".to_string()));
/// ```
#[must_use = "dropping the guard immediately removes the provided value"]
pub fn provide_context<T: Clone + 'static>(value: T) -> ContextGuard<T> {
	let previous = CONTEXTS.with(|contexts| {
		contexts
			.borrow_mut()
			.insert(TypeId::of::<T>(), Box::new(value))
	});

	ContextGuard {
		previous,
		_marker: PhantomData,
	}
}

/// Reads the nearest provided value of type `T`.
///
/// Returns `None` when no scope currently provides a `T`.
pub fn use_context<T: Clone + 'static>() -> Option<T> {
	CONTEXTS.with(|contexts| {
		contexts
			.borrow()
			.get(&TypeId::of::<T>())
			.and_then(|value| value.downcast_ref::<T>())
			.cloned()
	})
}
