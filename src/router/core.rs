//! Core Router implementation.
//!
//! The route table, path matching, and History API navigation. The
//! router exposes the current path, parameters, and matched route name
//! as signals; `push`/`replace` and the popstate listener write them.
//!
//! [`Router::start`] is the single registration step that wires the
//! router to the document: it installs the popstate listener and the
//! global click interceptor, and the returned [`RouterLifecycle`]
//! detaches both when dropped.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use crate::component::View;
use crate::dom::EventHandle;
use crate::reactive::{Signal, SubscriptionId, provide_context};
use crate::router::context::RouteContext;
use crate::router::history::{
	HistoryState, NavigationType, current_path, push_state, replace_state,
};
use crate::router::intercept;
use crate::router::pattern::{PathPattern, PatternError};
use crate::router::resolve::normalize_path;

/// Type alias for route guard functions.
pub(super) type RouteGuard = Arc<dyn Fn(&RouteMatch) -> bool + Send + Sync>;

/// Error type for typed parameter access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
	/// The route has no parameter with the requested name.
	Missing(String),
	/// A parameter value failed to parse as the requested type.
	Parse {
		/// Parameter name.
		param: String,
		/// Expected type name.
		expected: &'static str,
		/// Raw string value that failed to parse.
		raw_value: String,
		/// Error message from parsing.
		source: String,
	},
}

impl std::fmt::Display for PathError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Missing(param) => write!(f, "missing parameter: {}", param),
			Self::Parse {
				param,
				expected,
				raw_value,
				source,
			} => write!(
				f,
				"failed to parse parameter '{}' value '{}' as {}: {}",
				param, raw_value, expected, source
			),
		}
	}
}

impl std::error::Error for PathError {}

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
	/// Route not found.
	NotFound(String),
	/// Invalid route name.
	InvalidRouteName(String),
	/// Missing parameter for reverse URL.
	MissingParameter(String),
	/// Navigation failed.
	NavigationFailed(String),
	/// A route pattern failed to compile.
	InvalidPattern(PatternError),
}

impl std::fmt::Display for RouterError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::NotFound(path) => write!(f, "route not found: {}", path),
			Self::InvalidRouteName(name) => write!(f, "invalid route name: {}", name),
			Self::MissingParameter(param) => write!(f, "missing parameter: {}", param),
			Self::NavigationFailed(msg) => write!(f, "navigation failed: {}", msg),
			Self::InvalidPattern(err) => write!(f, "invalid route pattern: {}", err),
		}
	}
}

impl std::error::Error for RouterError {}

impl From<PatternError> for RouterError {
	fn from(err: PatternError) -> Self {
		Self::InvalidPattern(err)
	}
}

/// A matched route with extracted parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The matched route.
	pub route: Route,
	/// Extracted path parameters.
	pub params: HashMap<String, String>,
}

impl RouteMatch {
	/// Parses a path parameter into a typed value.
	///
	/// # Example
	///
	/// ```ignore
	/// let id: i64 = route_match.param("id")?;
	/// ```
	pub fn param<T>(&self, name: &str) -> Result<T, PathError>
	where
		T: FromStr,
		T::Err: std::fmt::Display,
	{
		let raw = self
			.params
			.get(name)
			.ok_or_else(|| PathError::Missing(name.to_string()))?;

		raw.parse::<T>().map_err(|e| PathError::Parse {
			param: name.to_string(),
			expected: std::any::type_name::<T>(),
			raw_value: raw.clone(),
			source: e.to_string(),
		})
	}
}

/// A single route definition.
#[derive(Clone)]
pub struct Route {
	/// The path pattern.
	pattern: PathPattern,
	/// Mount prefix of the group this route was registered under.
	base: String,
	/// Optional route name for reverse lookups.
	name: Option<String>,
	/// The component factory.
	component: Arc<dyn Fn() -> View + Send + Sync>,
	/// Optional guard function.
	guard: Option<RouteGuard>,
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern)
			.field("base", &self.base)
			.field("name", &self.name)
			.field("has_guard", &self.guard.is_some())
			.finish()
	}
}

impl Route {
	/// Creates a new route.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] when the pattern does not
	/// compile.
	pub fn new<F>(pattern: &str, component: F) -> Result<Self, RouterError>
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		Ok(Self {
			pattern: PathPattern::new(pattern)?,
			base: "/".to_string(),
			name: None,
			component: Arc::new(component),
			guard: None,
		})
	}

	/// Creates a named route.
	pub fn named<F>(name: impl Into<String>, pattern: &str, component: F) -> Result<Self, RouterError>
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		let mut route = Self::new(pattern, component)?;
		route.name = Some(name.into());
		Ok(route)
	}

	/// Adds a guard to this route.
	pub fn with_guard<G>(mut self, guard: G) -> Self
	where
		G: Fn(&RouteMatch) -> bool + Send + Sync + 'static,
	{
		self.guard = Some(Arc::new(guard));
		self
	}

	fn with_base(mut self, base: impl Into<String>) -> Self {
		self.base = base.into();
		self
	}

	/// Returns the route name.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Returns the pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns the mount prefix links resolve against inside this route.
	pub fn base(&self) -> &str {
		&self.base
	}

	/// Renders the route's component.
	pub fn render(&self) -> View {
		(self.component)()
	}

	/// Checks if the guard allows access.
	pub fn check_guard(&self, route_match: &RouteMatch) -> bool {
		self.guard.as_ref().map(|g| g(route_match)).unwrap_or(true)
	}
}

/// Collects routes registered under a shared mount prefix.
///
/// Created by [`Router::group`]. Route patterns inside the group are
/// relative to the prefix, and links rendered by the grouped routes
/// resolve relative targets against it.
pub struct RouteGroup {
	prefix: String,
	routes: Vec<Route>,
	errors: Vec<RouterError>,
}

impl RouteGroup {
	fn new(prefix: &str) -> Self {
		Self {
			prefix: normalize_path(prefix),
			routes: Vec::new(),
			errors: Vec::new(),
		}
	}

	/// Adds a route under the group prefix.
	pub fn route<F>(mut self, pattern: &str, component: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		let full = join_pattern(&self.prefix, pattern);
		match Route::new(&full, component) {
			Ok(route) => self.routes.push(route.with_base(self.prefix.clone())),
			Err(err) => self.errors.push(err),
		}
		self
	}

	/// Adds a named route under the group prefix.
	pub fn named_route<F>(mut self, name: &str, pattern: &str, component: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		let full = join_pattern(&self.prefix, pattern);
		match Route::named(name, &full, component) {
			Ok(route) => self.routes.push(route.with_base(self.prefix.clone())),
			Err(err) => self.errors.push(err),
		}
		self
	}

	/// Adds a guarded route under the group prefix.
	pub fn guarded_route<F, G>(mut self, pattern: &str, component: F, guard: G) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
		G: Fn(&RouteMatch) -> bool + Send + Sync + 'static,
	{
		let full = join_pattern(&self.prefix, pattern);
		match Route::new(&full, component) {
			Ok(route) => self
				.routes
				.push(route.with_guard(guard).with_base(self.prefix.clone())),
			Err(err) => self.errors.push(err),
		}
		self
	}
}

/// Joins a group prefix and a route pattern with exactly one slash.
fn join_pattern(prefix: &str, pattern: &str) -> String {
	let prefix = prefix.trim_end_matches('/');
	let pattern = pattern.trim_start_matches('/');
	if pattern.is_empty() {
		format!("{}/", prefix)
	} else {
		format!("{}/{}", prefix, pattern)
	}
}

/// The main client-side router.
pub struct Router {
	/// Registered routes.
	routes: Vec<Route>,
	/// Named routes for reverse lookups.
	named_routes: HashMap<String, usize>,
	/// Errors collected during registration.
	errors: Vec<RouterError>,
	/// Current path signal.
	current_path: Signal<String>,
	/// Current params signal.
	current_params: Signal<HashMap<String, String>>,
	/// Current matched route name signal.
	current_route_name: Signal<Option<String>>,
	/// Not found handler.
	not_found: Option<Arc<dyn Fn() -> View + Send + Sync>>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes_count", &self.routes.len())
			.field(
				"named_routes",
				&self.named_routes.keys().collect::<Vec<_>>(),
			)
			.finish()
	}
}

impl Default for Router {
	fn default() -> Self {
		Self::new()
	}
}

impl Router {
	/// Creates a new router.
	pub fn new() -> Self {
		let initial_path = current_path().unwrap_or_else(|_| "/".to_string());

		Self {
			routes: Vec::new(),
			named_routes: HashMap::new(),
			errors: Vec::new(),
			current_path: Signal::new(initial_path),
			current_params: Signal::new(HashMap::new()),
			current_route_name: Signal::new(None),
			not_found: None,
		}
	}

	/// Adds a route to the router.
	pub fn route<F>(mut self, pattern: &str, component: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		match Route::new(pattern, component) {
			Ok(route) => self.routes.push(route),
			Err(err) => self.errors.push(err),
		}
		self
	}

	/// Adds a named route to the router.
	pub fn named_route<F>(mut self, name: &str, pattern: &str, component: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		match Route::named(name, pattern, component) {
			Ok(route) => {
				self.named_routes.insert(name.to_string(), self.routes.len());
				self.routes.push(route);
			}
			Err(err) => self.errors.push(err),
		}
		self
	}

	/// Adds a route with a guard.
	pub fn guarded_route<F, G>(mut self, pattern: &str, component: F, guard: G) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
		G: Fn(&RouteMatch) -> bool + Send + Sync + 'static,
	{
		match Route::new(pattern, component) {
			Ok(route) => self.routes.push(route.with_guard(guard)),
			Err(err) => self.errors.push(err),
		}
		self
	}

	/// Registers a group of routes under a shared mount prefix.
	///
	/// Links rendered by routes in the group resolve relative targets
	/// against the prefix:
	///
	/// ```ignore
	/// let router = Router::new().group("/post", |g| {
	///     g.named_route("post_detail", ":id", post_page)
	/// });
	/// // Inside the rendered route, A::new("1") points at /post/1.
	/// ```
	pub fn group<F>(mut self, prefix: &str, build: F) -> Self
	where
		F: FnOnce(RouteGroup) -> RouteGroup,
	{
		let group = build(RouteGroup::new(prefix));

		self.errors.extend(group.errors);
		for route in group.routes {
			if let Some(name) = route.name() {
				self.named_routes
					.insert(name.to_string(), self.routes.len());
			}
			self.routes.push(route);
		}
		self
	}

	/// Sets the not found handler.
	pub fn not_found<F>(mut self, component: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		self.not_found = Some(Arc::new(component));
		self
	}

	/// Returns errors collected while registering routes.
	///
	/// Registration is infallible by signature (builder style); a route
	/// whose pattern failed to compile is skipped and its error recorded
	/// here.
	pub fn registration_errors(&self) -> &[RouterError] {
		&self.errors
	}

	/// Returns the current path signal.
	pub fn current_path(&self) -> &Signal<String> {
		&self.current_path
	}

	/// Returns the current params signal.
	pub fn current_params(&self) -> &Signal<HashMap<String, String>> {
		&self.current_params
	}

	/// Returns the current route name signal.
	pub fn current_route_name(&self) -> &Signal<Option<String>> {
		&self.current_route_name
	}

	/// Matches a path against registered routes.
	///
	/// Routes are tried in registration order; guards filter matches.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		for route in &self.routes {
			if let Some(params) = route.pattern().matches(path) {
				let route_match = RouteMatch {
					route: route.clone(),
					params,
				};

				if route.check_guard(&route_match) {
					return Some(route_match);
				}
			}
		}
		None
	}

	/// Navigates to a path using pushState.
	pub fn push(&self, path: &str) -> Result<(), RouterError> {
		self.navigate(path, NavigationType::Push)
	}

	/// Navigates to a path using replaceState.
	pub fn replace(&self, path: &str) -> Result<(), RouterError> {
		self.navigate(path, NavigationType::Replace)
	}

	/// Internal navigation implementation.
	fn navigate(&self, path: &str, nav_type: NavigationType) -> Result<(), RouterError> {
		let route_match = self.match_path(path);

		let state = HistoryState::new(path)
			.with_params(
				route_match
					.as_ref()
					.map(|m| m.params.clone())
					.unwrap_or_default(),
			)
			.with_route_name(
				route_match
					.as_ref()
					.and_then(|m| m.route.name())
					.unwrap_or(""),
			);

		let result = match nav_type {
			NavigationType::Push => push_state(&state),
			NavigationType::Replace => replace_state(&state),
			NavigationType::Pop => Ok(()),
		};

		// A failed history write leaves the signals untouched.
		result.map_err(|e| RouterError::NavigationFailed(e.to_string()))?;

		self.current_path.set(path.to_string());
		self.current_params.set(state.params);
		self.current_route_name.set(state.route_name);

		Ok(())
	}

	/// Generates a URL by route name with parameters.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let index = self
			.named_routes
			.get(name)
			.ok_or_else(|| RouterError::InvalidRouteName(name.to_string()))?;

		let route = &self.routes[*index];
		let params_map: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();

		route.pattern().reverse(&params_map).ok_or_else(|| {
			let missing = route
				.pattern()
				.param_names()
				.iter()
				.find(|name| !params_map.contains_key(*name))
				.cloned()
				.unwrap_or_else(|| "unknown".to_string());
			RouterError::MissingParameter(missing)
		})
	}

	/// Renders the current route's component.
	///
	/// The component renders under a [`RouteContext`] scope carrying the
	/// route's mount prefix and the current path, so links inside it can
	/// resolve relative targets and mark themselves active.
	pub fn render_current(&self) -> View {
		let path = self.current_path.get();

		if let Some(route_match) = self.match_path(&path) {
			let scope = RouteContext::new(route_match.route.base(), path.clone());
			let _ctx = provide_context(scope);
			route_match.route.render()
		} else if let Some(not_found) = &self.not_found {
			let _ctx = provide_context(RouteContext::new(path.clone(), path));
			not_found()
		} else {
			View::Empty
		}
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.named_routes.contains_key(name)
	}

	/// Renders the current route into the outlet element, if present.
	///
	/// The outlet is the first element carrying `data-router-outlet`
	/// (see [`RouterOutlet`](crate::router::RouterOutlet)).
	#[cfg(target_arch = "wasm32")]
	pub fn render_to_outlet(&self) {
		let outlet = match crate::dom::document() {
			Ok(document) => document.query_selector("[data-router-outlet]"),
			Err(_) => return,
		};

		if let Ok(Some(outlet)) = outlet {
			outlet.set_inner_html("");
			if let Err(_err) = self.render_current().mount(&outlet) {
				crate::error_log!("failed to render route into outlet: {}", _err);
			}
		}
	}

	/// Renders into the outlet (non-WASM placeholder).
	#[cfg(not(target_arch = "wasm32"))]
	pub fn render_to_outlet(&self) {}

	/// Starts the router: the single registration step.
	///
	/// Installs the popstate listener and the global click interceptor,
	/// renders the current route into the outlet, and re-renders on
	/// every path change. The returned [`RouterLifecycle`] owns the
	/// listeners; dropping it detaches them. Call
	/// [`RouterLifecycle::forget`] for page-lifetime wiring.
	pub fn start(router: Arc<Router>) -> Result<RouterLifecycle, RouterError> {
		let popstate = {
			let path_signal = router.current_path.clone();
			let params_signal = router.current_params.clone();
			let name_signal = router.current_route_name.clone();

			crate::router::history::listen_popstate(move |path, state| {
				path_signal.set(path);
				match state {
					Some(state) => {
						params_signal.set(state.params);
						name_signal.set(state.route_name);
					}
					None => {
						params_signal.set(HashMap::new());
						name_signal.set(None);
					}
				}
			})
			.map_err(|e| RouterError::NavigationFailed(e.to_string()))?
		};

		let clicks = {
			let router = Arc::clone(&router);
			intercept::install(move |request| {
				let result = if request.replace {
					router.replace(&request.to)
				} else {
					router.push(&request.to)
				};
				if let Err(_err) = result {
					crate::error_log!("navigation to {} failed: {}", request.to, _err);
				}
			})
			.map_err(|e| RouterError::NavigationFailed(e.to_string()))?
		};

		let render_subscription = {
			let render_router = Arc::clone(&router);
			router
				.current_path
				.subscribe(move |_| render_router.render_to_outlet())
		};

		router.render_to_outlet();

		Ok(RouterLifecycle {
			router,
			render_subscription: Some(render_subscription),
			popstate: Some(popstate),
			clicks: Some(clicks),
		})
	}
}

/// Owns the router's document wiring.
///
/// Returned by [`Router::start`]. Dropping it detaches the popstate
/// listener, the click interceptor, and the re-render subscription;
/// the registration is scoped to this object's lifetime.
pub struct RouterLifecycle {
	router: Arc<Router>,
	render_subscription: Option<SubscriptionId>,
	popstate: Option<EventHandle>,
	clicks: Option<EventHandle>,
}

impl RouterLifecycle {
	/// Returns the router this lifecycle drives.
	pub fn router(&self) -> &Arc<Router> {
		&self.router
	}

	/// Leaks the wiring so it lives for the rest of the page.
	pub fn forget(mut self) {
		if let Some(handle) = self.popstate.take() {
			handle.forget();
		}
		if let Some(handle) = self.clicks.take() {
			handle.forget();
		}
		// Keep the render subscription registered.
		self.render_subscription.take();
	}
}

impl Drop for RouterLifecycle {
	fn drop(&mut self) {
		if let Some(id) = self.render_subscription.take() {
			self.router.current_path.unsubscribe(id);
		}
		// Event handles detach themselves.
	}
}

impl std::fmt::Debug for RouterLifecycle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterLifecycle")
			.field("router", &self.router)
			.field("active", &self.popstate.is_some())
			.finish()
	}
}
