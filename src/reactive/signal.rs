//! Signal - observable state cell.
//!
//! `Signal<T>` holds a value shared between clones and notifies
//! subscribers synchronously when the value changes.
//!
//! ## Example
//!
//! ```ignore
//! use montgomery::Signal;
//!
//! let path = Signal::new("/".to_string());
//! path.set("/about".to_string());
//! assert_eq!(path.get(), "/about");
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identifier for a registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// A shared observable value.
///
/// `Signal<T>` is cheap to clone; all clones share the same underlying
/// value and subscriber list. Subscribers run synchronously on every
/// [`set`](Signal::set) or [`update`](Signal::update).
///
/// Subscribers may read any signal (including the one that notified
/// them) but must not write the signal they observe; doing so would
/// re-enter the value cell while it is borrowed.
pub struct Signal<T: 'static> {
	/// The value, shared between clones.
	value: Rc<RefCell<T>>,
	/// Registered subscribers.
	subscribers: Rc<RefCell<Vec<(usize, Subscriber<T>)>>>,
	/// Next subscription id.
	next_id: Rc<Cell<usize>>,
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			subscribers: Rc::clone(&self.subscribers),
			next_id: Rc::clone(&self.next_id),
		}
	}
}

impl<T: 'static> Signal<T> {
	/// Creates a new signal with the given initial value.
	pub fn new(value: T) -> Self {
		Self {
			value: Rc::new(RefCell::new(value)),
			subscribers: Rc::new(RefCell::new(Vec::new())),
			next_id: Rc::new(Cell::new(0)),
		}
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Reads the current value without cloning it.
	pub fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Replaces the value and notifies subscribers.
	pub fn set(&self, value: T) {
		*self.value.borrow_mut() = value;
		self.notify();
	}

	/// Updates the value in place and notifies subscribers once.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		f(&mut self.value.borrow_mut());
		self.notify();
	}

	/// Registers a subscriber called after every change.
	pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriptionId {
		let id = self.next_id.get();
		self.next_id.set(id + 1);
		self.subscribers.borrow_mut().push((id, Rc::new(f)));
		SubscriptionId(id)
	}

	/// Removes a previously registered subscriber.
	pub fn unsubscribe(&self, id: SubscriptionId) {
		self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id.0);
	}

	/// Returns the number of registered subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.borrow().len()
	}

	fn notify(&self) {
		// Snapshot the subscriber list so callbacks may subscribe or
		// unsubscribe without holding the list borrow.
		let subscribers: Vec<Subscriber<T>> = self
			.subscribers
			.borrow()
			.iter()
			.map(|(_, f)| Rc::clone(f))
			.collect();

		let value = self.value.borrow();
		for subscriber in subscribers {
			subscriber(&value);
		}
	}
}

impl<T: std::fmt::Debug + 'static> std::fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Signal")
			.field("value", &self.value.borrow())
			.field("subscribers", &self.subscribers.borrow().len())
			.finish()
	}
}
