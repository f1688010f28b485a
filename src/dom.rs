//! DOM access layer.
//!
//! Thin wrappers over `web-sys` for the handful of browser APIs the
//! router touches: the document, the window, and event listener
//! registration. Listener registration returns an [`EventHandle`] that
//! detaches the listener when dropped, so every listener the router
//! installs is scoped to an owner's lifetime instead of living forever.
//! Call [`EventHandle::forget`] to opt into page-lifetime listeners.
//!
//! On non-WASM targets the module compiles to inert stubs so that router
//! logic can be exercised by native tests.

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;

/// Error type for DOM operations.
#[derive(Debug, Clone, Error)]
pub enum DomError {
	/// Window object not available.
	#[error("window object not available")]
	NoWindow,
	/// Document object not available.
	#[error("document object not available")]
	NoDocument,
	/// A JavaScript call failed.
	#[error("JavaScript error: {0}")]
	Js(String),
}

impl DomError {
	/// Converts a raw JS error value into a `DomError`.
	#[cfg(target_arch = "wasm32")]
	pub(crate) fn from_js(value: wasm_bindgen::JsValue) -> Self {
		Self::Js(format!("{:?}", value))
	}
}

/// Event types the router listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
	/// A mouse click anywhere in the document.
	Click,
	/// Browser back/forward navigation.
	PopState,
}

impl EventType {
	/// Returns the DOM event name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Click => "click",
			Self::PopState => "popstate",
		}
	}
}

impl std::fmt::Display for EventType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Returns the global window object.
#[cfg(target_arch = "wasm32")]
pub fn window() -> Result<web_sys::Window, DomError> {
	web_sys::window().ok_or(DomError::NoWindow)
}

/// Returns the current document.
#[cfg(target_arch = "wasm32")]
pub fn document() -> Result<web_sys::Document, DomError> {
	window()?.document().ok_or(DomError::NoDocument)
}

/// An attached event listener.
///
/// Dropping the handle removes the listener from its target. This is how
/// the router keeps its global listeners scoped to the lifetime of the
/// object that registered them.
#[cfg(target_arch = "wasm32")]
pub struct EventHandle {
	target: web_sys::EventTarget,
	event_type: EventType,
	closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

#[cfg(target_arch = "wasm32")]
impl EventHandle {
	/// Attaches a listener to `target` and returns the owning handle.
	pub(crate) fn attach(
		target: &web_sys::EventTarget,
		event_type: EventType,
		handler: impl FnMut(web_sys::Event) + 'static,
	) -> Result<Self, DomError> {
		let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
		target
			.add_event_listener_with_callback(
				event_type.as_str(),
				closure.as_ref().unchecked_ref::<js_sys::Function>(),
			)
			.map_err(DomError::from_js)?;

		Ok(Self {
			target: target.clone(),
			event_type,
			closure: Some(closure),
		})
	}

	/// Returns the event type this handle listens for.
	pub fn event_type(&self) -> EventType {
		self.event_type
	}

	/// Leaks the listener so it lives for the rest of the page.
	pub fn forget(mut self) {
		if let Some(closure) = self.closure.take() {
			closure.forget();
		}
	}
}

#[cfg(target_arch = "wasm32")]
impl Drop for EventHandle {
	fn drop(&mut self) {
		if let Some(closure) = &self.closure {
			let _ = self.target.remove_event_listener_with_callback(
				self.event_type.as_str(),
				closure.as_ref().unchecked_ref::<js_sys::Function>(),
			);
		}
	}
}

#[cfg(target_arch = "wasm32")]
impl std::fmt::Debug for EventHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventHandle")
			.field("event_type", &self.event_type)
			.field("attached", &self.closure.is_some())
			.finish()
	}
}

/// An attached event listener (non-WASM placeholder).
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct EventHandle {
	event_type: EventType,
}

#[cfg(not(target_arch = "wasm32"))]
impl EventHandle {
	/// Creates a detached placeholder handle.
	pub(crate) fn detached(event_type: EventType) -> Self {
		Self { event_type }
	}

	/// Returns the event type this handle listens for.
	pub fn event_type(&self) -> EventType {
		self.event_type
	}

	/// Leaks the listener (no-op placeholder).
	pub fn forget(self) {}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_event_type_names() {
		assert_eq!(EventType::Click.as_str(), "click");
		assert_eq!(EventType::PopState.as_str(), "popstate");
	}

	#[test]
	fn test_event_type_display() {
		assert_eq!(EventType::Click.to_string(), "click");
	}

	#[test]
	fn test_dom_error_display() {
		assert_eq!(DomError::NoWindow.to_string(), "window object not available");
		assert_eq!(
			DomError::Js("boom".to_string()).to_string(),
			"JavaScript error: boom"
		);
	}

	#[cfg(not(target_arch = "wasm32"))]
	#[test]
	fn test_detached_handle() {
		let handle = EventHandle::detached(EventType::Click);
		assert_eq!(handle.event_type(), EventType::Click);
		handle.forget();
	}
}
