//! Client-side routing.
//!
//! The router owns two document-facing behaviors:
//!
//! 1. **Anchor-click interception** ([`intercept`]): one delegated click
//!    listener decides per click whether to navigate in place via the
//!    History API or leave the click to the browser.
//! 2. **The enhanced link** ([`A`]): an `<a>` replacement that resolves
//!    relative targets against the route subtree it renders under and
//!    carries `aria-current="page"` when it points at the current
//!    location.
//!
//! Around those sit the route table ([`Router`]), `:param` patterns
//! ([`PathPattern`]), History API plumbing ([`history`]), and relative
//! path resolution ([`resolve`]).
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use montgomery::{A, Router, View};
//!
//! fn post_page() -> View {
//!     A::new("1").child("First post").render()
//! }
//!
//! let router = Arc::new(
//!     Router::new()
//!         .route("/", || View::text("Home"))
//!         .group("/post", |g| g.named_route("post_detail", ":id", post_page))
//!         .not_found(|| View::text("404")),
//! );
//!
//! // One registration step: popstate listener + click interceptor.
//! let lifecycle = Router::start(Arc::clone(&router))?;
//! # Ok::<(), montgomery::RouterError>(())
//! ```

mod components;
mod context;
mod core;
pub mod history;
pub mod intercept;
mod pattern;
pub mod resolve;

pub use components::{A, Redirect, RouterOutlet, guard, guard_or};
pub use context::RouteContext;
pub use core::{PathError, Route, RouteGroup, RouteMatch, Router, RouterError, RouterLifecycle};
pub use history::{HistoryState, NavigationType};
pub use intercept::{AnchorSnapshot, BypassReason, ClickModifiers, NavigationRequest, bypass_reason};
pub use pattern::{PathPattern, PatternError};
pub use resolve::{is_external, normalize_path, paths_equal, resolve_href};
