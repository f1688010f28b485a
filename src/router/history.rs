//! History API integration.
//!
//! Wraps `pushState`/`replaceState` and the `popstate` event. Each
//! navigation stores a serialized [`HistoryState`] in the History API
//! state slot so that back/forward can restore the matched parameters
//! and route name without re-matching.
//!
//! Non-WASM targets get no-op counterparts so router logic is testable
//! natively.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dom::{DomError, EventHandle, EventType};

/// How a navigation reached the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// A new history entry (`pushState`).
	Push,
	/// Replacing the current entry (`replaceState`).
	Replace,
	/// Browser back/forward (`popstate`).
	Pop,
}

/// State payload stored in each history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
	/// The navigated path.
	pub path: String,
	/// Path parameters extracted at navigation time.
	#[serde(default)]
	pub params: HashMap<String, String>,
	/// Name of the matched route, if any.
	#[serde(default)]
	pub route_name: Option<String>,
}

impl HistoryState {
	/// Creates a state payload for a path.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			params: HashMap::new(),
			route_name: None,
		}
	}

	/// Sets the extracted parameters.
	pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
		self.params = params;
		self
	}

	/// Sets the matched route name. An empty name clears it.
	pub fn with_route_name(mut self, name: impl Into<String>) -> Self {
		let name = name.into();
		self.route_name = if name.is_empty() { None } else { Some(name) };
		self
	}
}

/// Returns the current location's path.
#[cfg(target_arch = "wasm32")]
pub fn current_path() -> Result<String, DomError> {
	crate::dom::window()?
		.location()
		.pathname()
		.map_err(DomError::from_js)
}

/// Returns the current location's path (non-WASM placeholder).
#[cfg(not(target_arch = "wasm32"))]
pub fn current_path() -> Result<String, DomError> {
	Ok("/".to_string())
}

/// Returns the current document origin.
#[cfg(target_arch = "wasm32")]
pub fn current_origin() -> Result<String, DomError> {
	crate::dom::window()?
		.location()
		.origin()
		.map_err(DomError::from_js)
}

/// Returns the current document origin (non-WASM placeholder).
#[cfg(not(target_arch = "wasm32"))]
pub fn current_origin() -> Result<String, DomError> {
	Ok(String::new())
}

/// Returns the current location's query string (including the `?`).
#[cfg(target_arch = "wasm32")]
pub fn current_search() -> Result<String, DomError> {
	crate::dom::window()?
		.location()
		.search()
		.map_err(DomError::from_js)
}

/// Returns the current location's query string (non-WASM placeholder).
#[cfg(not(target_arch = "wasm32"))]
pub fn current_search() -> Result<String, DomError> {
	Ok(String::new())
}

/// Parses a query string into a parameter map.
///
/// Accepts the string with or without the leading `?`. Malformed input
/// yields an empty map rather than an error; a bad query string should
/// never break navigation.
pub fn query_params(search: &str) -> HashMap<String, String> {
	let trimmed = search.strip_prefix('?').unwrap_or(search);
	serde_urlencoded::from_str(trimmed).unwrap_or_default()
}

/// Pushes a new history entry.
#[cfg(target_arch = "wasm32")]
pub fn push_state(state: &HistoryState) -> Result<(), DomError> {
	let history = crate::dom::window()?.history().map_err(DomError::from_js)?;
	let payload = serialize_state(state)?;
	history
		.push_state_with_url(&payload, "", Some(&state.path))
		.map_err(DomError::from_js)
}

/// Pushes a new history entry (non-WASM placeholder).
#[cfg(not(target_arch = "wasm32"))]
pub fn push_state(_state: &HistoryState) -> Result<(), DomError> {
	Ok(())
}

/// Replaces the current history entry.
#[cfg(target_arch = "wasm32")]
pub fn replace_state(state: &HistoryState) -> Result<(), DomError> {
	let history = crate::dom::window()?.history().map_err(DomError::from_js)?;
	let payload = serialize_state(state)?;
	history
		.replace_state_with_url(&payload, "", Some(&state.path))
		.map_err(DomError::from_js)
}

/// Replaces the current history entry (non-WASM placeholder).
#[cfg(not(target_arch = "wasm32"))]
pub fn replace_state(_state: &HistoryState) -> Result<(), DomError> {
	Ok(())
}

#[cfg(target_arch = "wasm32")]
fn serialize_state(state: &HistoryState) -> Result<wasm_bindgen::JsValue, DomError> {
	let json = serde_json::to_string(state).map_err(|e| DomError::Js(e.to_string()))?;
	Ok(wasm_bindgen::JsValue::from_str(&json))
}

/// Listens for browser back/forward navigation.
///
/// The callback receives the new path and the deserialized
/// [`HistoryState`] when the entry carries one. Dropping the returned
/// handle detaches the listener.
#[cfg(target_arch = "wasm32")]
pub fn listen_popstate(
	mut callback: impl FnMut(String, Option<HistoryState>) + 'static,
) -> Result<EventHandle, DomError> {
	use wasm_bindgen::JsCast;

	let window = crate::dom::window()?;
	let target: &web_sys::EventTarget = window.as_ref();

	EventHandle::attach(target, EventType::PopState, move |event| {
		let path = match current_path() {
			Ok(path) => path,
			Err(_err) => {
				crate::error_log!("popstate: failed to read location: {}", _err);
				return;
			}
		};

		let state = event
			.dyn_ref::<web_sys::PopStateEvent>()
			.and_then(|e| e.state().as_string())
			.and_then(|json| serde_json::from_str(&json).ok());

		callback(path, state);
	})
}

/// Listens for browser back/forward navigation (non-WASM placeholder).
#[cfg(not(target_arch = "wasm32"))]
pub fn listen_popstate(
	_callback: impl FnMut(String, Option<HistoryState>) + 'static,
) -> Result<EventHandle, DomError> {
	Ok(EventHandle::detached(EventType::PopState))
}
