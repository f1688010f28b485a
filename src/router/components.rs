//! Navigation components.
//!
//! [`A`] is the enhanced link: an `<a>` that resolves relative targets
//! against the route subtree it renders under and marks itself as the
//! current page for assistive technology. [`RouterOutlet`] marks where
//! route content mounts, and [`Redirect`] renders an immediate
//! navigation.

use crate::component::{Component, ElementView, IntoView, View};
use crate::router::context::current_scope;
use crate::router::resolve::{is_external, normalize_path, paths_equal, resolve_href};

/// An enhanced link that navigates without a full page reload.
///
/// Renders an `<a>` whose relative `href` is resolved against the
/// enclosing route scope, and which carries `aria-current="page"` when
/// the resolved target is the current location. Clicks are handled by
/// the router's delegated interceptor, subject to the same bail-out
/// rules as any other anchor.
///
/// # Example
///
/// ```ignore
/// use montgomery::A;
///
/// // Inside a route mounted at /post, this points at /post/1.
/// let link = A::new("1").child("First post");
/// ```
#[derive(Debug, Clone)]
pub struct A {
	/// The (possibly relative) destination.
	href: String,
	/// Link content.
	children: Vec<View>,
	/// CSS classes always present.
	class: Option<String>,
	/// CSS classes appended while the link is active.
	active_class: Option<String>,
	/// Whether to replace the current history entry.
	replace: bool,
	/// Whether to force external (new tab) behavior.
	external: bool,
	/// Whether active matching requires path equality (the default) or
	/// accepts the target as a prefix of the current location.
	exact: bool,
	/// Custom attributes.
	attrs: Vec<(String, String)>,
}

impl A {
	/// Creates a new link.
	pub fn new(href: impl Into<String>) -> Self {
		Self {
			href: href.into(),
			children: Vec::new(),
			class: None,
			active_class: None,
			replace: false,
			external: false,
			exact: true,
			attrs: Vec::new(),
		}
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Sets a CSS class appended while the link is active.
	pub fn active_class(mut self, class: impl Into<String>) -> Self {
		self.active_class = Some(class.into());
		self
	}

	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Marks this as an external link (new tab, never intercepted).
	pub fn external(mut self, external: bool) -> Self {
		self.external = external;
		self
	}

	/// Sets whether active matching requires exact path equality.
	///
	/// With `exact(false)` the link is also active when the current
	/// location lives below its target (section links).
	pub fn exact(mut self, exact: bool) -> Self {
		self.exact = exact;
		self
	}

	/// Adds a custom attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Returns the raw (unresolved) destination.
	pub fn href(&self) -> &str {
		&self.href
	}

	/// Returns whether this is a replace navigation.
	pub fn is_replace(&self) -> bool {
		self.replace
	}

	/// Resolves the destination against the enclosing route scope.
	pub fn resolved_href(&self) -> String {
		if self.is_external_link() {
			self.href.clone()
		} else {
			resolve_href(&current_scope().base, &self.href)
		}
	}

	fn is_external_link(&self) -> bool {
		self.external || is_external(&self.href)
	}

	fn is_active(&self, resolved: &str, current: &str) -> bool {
		if paths_equal(resolved, current) {
			return true;
		}
		if self.exact {
			return false;
		}

		// Prefix matching on segment boundaries; the root link would
		// otherwise be active everywhere.
		let target = normalize_path(resolved);
		if target == "/" {
			return false;
		}
		normalize_path(current).starts_with(&format!("{}/", target))
	}
}

impl Component for A {
	fn render(&self) -> View {
		let external = self.is_external_link();
		let scope = current_scope();

		let href = if external {
			self.href.clone()
		} else {
			resolve_href(&scope.base, &self.href)
		};

		let active = !external && self.is_active(&href, &scope.path);

		let class = match (&self.class, &self.active_class) {
			(Some(class), Some(active_class)) if active => {
				Some(format!("{} {}", class, active_class))
			}
			(None, Some(active_class)) if active => Some(active_class.clone()),
			(class, _) => class.clone(),
		};

		let mut el = ElementView::new("a").attr("href", href);

		if let Some(class) = class {
			el = el.attr("class", class);
		}

		if external {
			el = el.attr("target", "_blank");
			el = el.attr("rel", "noopener noreferrer");
		} else {
			// Marker attributes for the delegated click interceptor.
			el = el.attr("data-link", "true");
			if self.replace {
				el = el.attr("data-replace", "true");
			}
		}

		if active {
			el = el.attr("aria-current", "page");
		}

		for (name, value) in &self.attrs {
			el = el.attr(name.clone(), value.clone());
		}

		el.children(self.children.iter().cloned()).into_view()
	}

	fn name() -> &'static str {
		"A"
	}
}

/// Marks where the matched route's content is mounted.
///
/// [`Router::start`](crate::router::Router::start) renders the current
/// route into the first element carrying `data-router-outlet`.
#[derive(Debug, Clone, Default)]
pub struct RouterOutlet {
	/// The ID attribute for the outlet element.
	id: Option<String>,
	/// CSS class for the outlet element.
	class: Option<String>,
}

impl RouterOutlet {
	/// Creates a new router outlet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the ID attribute.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}
}

impl Component for RouterOutlet {
	fn render(&self) -> View {
		let mut el = ElementView::new("div").attr("data-router-outlet", "true");

		if let Some(ref id) = self.id {
			el = el.attr("id", id.clone());
		}

		if let Some(ref class) = self.class {
			el = el.attr("class", class.clone());
		}

		el.into_view()
	}

	fn name() -> &'static str {
		"RouterOutlet"
	}
}

/// A redirect component that immediately navigates to another path.
#[derive(Debug, Clone)]
pub struct Redirect {
	/// The destination path.
	to: String,
	/// Whether to replace the current history entry.
	replace: bool,
}

impl Redirect {
	/// Creates a new redirect.
	pub fn new(to: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			replace: true,
		}
	}

	/// Sets whether to use replace navigation.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Returns the destination path.
	pub fn to(&self) -> &str {
		&self.to
	}
}

impl Component for Redirect {
	fn render(&self) -> View {
		// Meta refresh as a no-script fallback; the client router picks
		// up the data attributes.
		ElementView::new("meta")
			.attr("http-equiv", "refresh")
			.attr("content", format!("0;url={}", self.to))
			.attr("data-redirect", self.to.clone())
			.attr("data-replace", if self.replace { "true" } else { "false" })
			.into_view()
	}

	fn name() -> &'static str {
		"Redirect"
	}
}

/// A navigation guard that conditionally renders content.
pub fn guard<F, V>(condition: F, content: V) -> impl FnOnce() -> View
where
	F: FnOnce() -> bool,
	V: IntoView,
{
	move || {
		if condition() {
			content.into_view()
		} else {
			View::Empty
		}
	}
}

/// A navigation guard with a fallback rendered when the condition fails.
pub fn guard_or<F, V, U>(condition: F, content: V, fallback: U) -> impl FnOnce() -> View
where
	F: FnOnce() -> bool,
	V: IntoView,
	U: IntoView,
{
	move || {
		if condition() {
			content.into_view()
		} else {
			fallback.into_view()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::provide_context;
	use crate::router::context::RouteContext;
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_link_resolves_relative_href_against_route_base() {
		let _scope = provide_context(RouteContext::new("/post", "/post/1"));

		let html = A::new("1").child("First").render().render_to_string();
		assert!(html.contains("href=\"/post/1\""));
	}

	#[test]
	#[serial]
	fn test_link_absolute_href_ignores_base() {
		let _scope = provide_context(RouteContext::new("/post", "/post/1"));

		let html = A::new("/about").child("About").render().render_to_string();
		assert!(html.contains("href=\"/about\""));
	}

	#[test]
	#[serial]
	fn test_link_active_when_target_is_current_location() {
		let _scope = provide_context(RouteContext::new("/post", "/post/1"));

		let html = A::new("1").child("First").render().render_to_string();
		assert!(html.contains("aria-current=\"page\""));
	}

	#[test]
	#[serial]
	fn test_link_inactive_when_target_differs() {
		let _scope = provide_context(RouteContext::new("/post", "/post/2"));

		let html = A::new("1").child("First").render().render_to_string();
		assert!(!html.contains("aria-current"));
	}

	#[test]
	#[serial]
	fn test_link_active_ignores_trailing_slash() {
		let _scope = provide_context(RouteContext::new("/post", "/post/1/"));

		let html = A::new("1").render().render_to_string();
		assert!(html.contains("aria-current=\"page\""));
	}

	#[test]
	#[serial]
	fn test_link_prefix_matching_with_exact_false() {
		let _scope = provide_context(RouteContext::new("/", "/docs/guide"));

		let html = A::new("/docs").exact(false).render().render_to_string();
		assert!(html.contains("aria-current=\"page\""));

		let html = A::new("/docs").render().render_to_string();
		assert!(!html.contains("aria-current"));
	}

	#[test]
	#[serial]
	fn test_root_link_not_prefix_active() {
		let _scope = provide_context(RouteContext::new("/", "/docs"));

		let html = A::new("/").exact(false).render().render_to_string();
		assert!(!html.contains("aria-current"));
	}

	#[test]
	#[serial]
	fn test_link_active_class() {
		let _scope = provide_context(RouteContext::new("/post", "/post/1"));

		let html = A::new("1")
			.class("nav")
			.active_class("nav-active")
			.render()
			.render_to_string();
		assert!(html.contains("class=\"nav nav-active\""));

		let html = A::new("2")
			.class("nav")
			.active_class("nav-active")
			.render()
			.render_to_string();
		assert!(html.contains("class=\"nav\""));
		assert!(!html.contains("nav-active"));
	}

	#[test]
	#[serial]
	fn test_link_marks_itself_for_interception() {
		let _scope = provide_context(RouteContext::new("/", "/"));

		let html = A::new("/about").render().render_to_string();
		assert!(html.contains("data-link=\"true\""));
		assert!(!html.contains("data-replace"));

		let html = A::new("/about").replace(true).render().render_to_string();
		assert!(html.contains("data-replace=\"true\""));
	}

	#[test]
	#[serial]
	fn test_external_link() {
		let html = A::new("https://example.org/x")
			.child("Example")
			.render()
			.render_to_string();

		assert!(html.contains("href=\"https://example.org/x\""));
		assert!(html.contains("target=\"_blank\""));
		assert!(html.contains("rel=\"noopener noreferrer\""));
		assert!(!html.contains("data-link"));
		assert!(!html.contains("aria-current"));
	}

	#[test]
	#[serial]
	fn test_forced_external_link() {
		let html = A::new("/files/report.pdf")
			.external(true)
			.render()
			.render_to_string();
		assert!(html.contains("target=\"_blank\""));
		assert!(!html.contains("data-link"));
	}

	#[test]
	#[serial]
	fn test_link_custom_attrs_and_children() {
		let _scope = provide_context(RouteContext::new("/", "/"));

		let html = A::new("/admin")
			.attr("aria-label", "Admin Panel")
			.child("Admin")
			.render()
			.render_to_string();
		assert!(html.contains("aria-label=\"Admin Panel\""));
		assert!(html.contains(">Admin</a>"));
	}

	#[test]
	fn test_router_outlet() {
		let html = RouterOutlet::new()
			.id("main-outlet")
			.class("content")
			.render()
			.render_to_string();

		assert!(html.contains("data-router-outlet=\"true\""));
		assert!(html.contains("id=\"main-outlet\""));
		assert!(html.contains("class=\"content\""));
	}

	#[test]
	fn test_redirect() {
		let redirect = Redirect::new("/login");
		assert_eq!(redirect.to(), "/login");

		let html = redirect.render().render_to_string();
		assert!(html.contains("data-redirect=\"/login\""));
		assert!(html.contains("data-replace=\"true\""));
	}

	#[test]
	fn test_redirect_push() {
		let html = Redirect::new("/login")
			.replace(false)
			.render()
			.render_to_string();
		assert!(html.contains("data-replace=\"false\""));
	}

	#[test]
	fn test_guard_true() {
		let view = guard(|| true, "Allowed")();
		assert_eq!(view.render_to_string(), "Allowed");
	}

	#[test]
	fn test_guard_false() {
		let view = guard(|| false, "Allowed")();
		assert_eq!(view.render_to_string(), "");
	}

	#[test]
	fn test_guard_with_fallback() {
		let view = guard_or(|| false, "Allowed", "Denied")();
		assert_eq!(view.render_to_string(), "Denied");
	}

	#[test]
	fn test_component_names() {
		assert_eq!(A::name(), "A");
		assert_eq!(RouterOutlet::name(), "RouterOutlet");
		assert_eq!(Redirect::name(), "Redirect");
	}
}
