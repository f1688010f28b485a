//! montgomery - Client-side Router for Rust WASM Apps
//!
//! A History API router for single-page applications compiled to
//! WebAssembly, built directly on `wasm-bindgen` and `web-sys`.
//!
//! ## Features
//!
//! - **Global link interception**: one delegated click listener decides,
//!   per anchor click, whether to navigate in place or defer to the
//!   browser (modifier keys, `target`/`download`/`rel="external"`
//!   attributes, and cross-origin targets always defer).
//! - **Enhanced links**: the [`A`] component resolves relative targets
//!   against its enclosing route subtree and sets `aria-current="page"`
//!   when it points at the current location.
//! - **Route table**: `:param` and `*rest` patterns, route groups with
//!   mount prefixes, named routes with reverse URL generation, guards,
//!   and typed parameter access.
//! - **Scoped wiring**: [`Router::start`] is the single registration
//!   step; dropping the returned lifecycle detaches every listener.
//!
//! ## Architecture
//!
//! - [`router`]: route table, matching, navigation, interception
//! - [`reactive`]: signals and scoped context values
//! - [`component`]: minimal view layer for the navigation components
//! - [`dom`]: thin `web-sys` wrappers with owned listener handles
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use montgomery::{A, Component, Router, RouterOutlet, View};
//!
//! fn post_page() -> View {
//!     A::new("1").child("First post").render()
//! }
//!
//! let router = Arc::new(
//!     Router::new()
//!         .route("/", || View::text("Home"))
//!         .group("/post", |g| g.named_route("post_detail", ":id", post_page)),
//! );
//!
//! let lifecycle = Router::start(Arc::clone(&router))?;
//! lifecycle.forget(); // keep the wiring for the page lifetime
//! # Ok::<(), montgomery::RouterError>(())
//! ```

#![warn(missing_docs)]

// Core modules
pub mod component;
pub mod dom;
pub mod logging;
pub mod reactive;

// Client-side routing
pub mod router;

// Re-export commonly used types
pub use component::{Component, ElementView, IntoView, View};
pub use dom::{DomError, EventHandle, EventType};
pub use reactive::{ContextGuard, Signal, SubscriptionId, provide_context, use_context};
pub use router::{
	A, AnchorSnapshot, BypassReason, ClickModifiers, HistoryState, NavigationRequest,
	NavigationType, PathError, PathPattern, PatternError, Redirect, Route, RouteContext,
	RouteGroup, RouteMatch, Router, RouterError, RouterLifecycle, RouterOutlet, bypass_reason,
	guard, guard_or, is_external, normalize_path, paths_equal, resolve_href,
};

/// Installs the `console_error_panic_hook` so panics surface as readable
/// console errors during development.
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
	console_error_panic_hook::set_once();
}

// Logging macros are exported via #[macro_export]:
// montgomery::debug_log!, info_log!, warn_log!, error_log!.
