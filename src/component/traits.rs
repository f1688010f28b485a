//! Component trait definition.

use super::into_view::View;

/// Trait for reusable UI components.
///
/// # Example
///
/// ```ignore
/// use montgomery::{Component, ElementView, IntoView, View};
///
/// struct Greeting {
///     name: String,
/// }
///
/// impl Component for Greeting {
///     fn render(&self) -> View {
///         ElementView::new("div")
///             .child(format!("Hello, {}!", self.name))
///             .into_view()
///     }
///
///     fn name() -> &'static str {
///         "Greeting"
///     }
/// }
/// ```
pub trait Component: 'static {
	/// Renders the component to a View.
	fn render(&self) -> View;

	/// Returns the component's name for debugging.
	fn name() -> &'static str
	where
		Self: Sized;
}
