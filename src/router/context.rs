//! Ambient context for the route subtree currently rendering.

use crate::reactive::use_context;
use crate::router::history::current_path;

/// Context provided while a matched route renders.
///
/// Signals to the components below it (links above all) which route
/// subtree they render under:
///
/// - `base` is the path prefix the subtree is mounted at (the group
///   prefix for grouped routes, the current path for flat routes).
///   Relative link targets resolve against it.
/// - `path` is the full current location path, used for active-link
///   marking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
	/// Mount prefix of the rendering route subtree.
	pub base: String,
	/// Full current location path.
	pub path: String,
}

impl RouteContext {
	/// Creates a context for a subtree mounted at `base` while the
	/// location is `path`.
	pub fn new(base: impl Into<String>, path: impl Into<String>) -> Self {
		Self {
			base: base.into(),
			path: path.into(),
		}
	}
}

/// Reads the enclosing route scope, falling back to the document
/// location when rendering outside a router.
pub(crate) fn current_scope() -> RouteContext {
	use_context::<RouteContext>().unwrap_or_else(|| {
		let path = current_path().unwrap_or_else(|_| "/".to_string());
		RouteContext::new(path.clone(), path)
	})
}
