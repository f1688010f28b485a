//! IntoView trait and View enum for component rendering.

use std::borrow::Cow;

#[cfg(target_arch = "wasm32")]
use crate::dom::DomError;

/// A unified representation of renderable content.
///
/// View is the core abstraction for all UI elements: DOM elements, text
/// nodes, fragments, or nothing at all. Event handling is intentionally
/// absent; click handling for links is delegated to the router's single
/// document-level interceptor.
#[derive(Debug, Clone)]
pub enum View {
	/// A DOM element.
	Element(ElementView),
	/// A text node.
	Text(Cow<'static, str>),
	/// A fragment containing multiple views (no wrapper element).
	Fragment(Vec<View>),
	/// An empty view (renders nothing).
	Empty,
}

/// Represents a DOM element in the view tree.
#[derive(Debug, Clone)]
pub struct ElementView {
	/// The tag name (e.g., "a", "div").
	tag: Cow<'static, str>,
	/// HTML attributes.
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	/// Child views.
	children: Vec<View>,
	/// Whether this is a void element (no closing tag).
	is_void: bool,
}

impl ElementView {
	/// Creates a new element view.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Adds multiple child views.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children
			.extend(children.into_iter().map(|c| c.into_view()));
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the child views.
	pub fn child_views(&self) -> &[View] {
		&self.children
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}
}

impl View {
	/// Creates an element view builder.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> ElementView {
		ElementView::new(tag)
	}

	/// Creates a text view.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment view.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoView>) -> Self {
		Self::Fragment(children.into_iter().map(|c| c.into_view()).collect())
	}

	/// Creates an empty view.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Renders the view to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.write_html(&mut output);
		output
	}

	fn write_html(&self, output: &mut String) {
		match self {
			View::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
				} else {
					output.push('>');
					for child in el.child_views() {
						child.write_html(output);
					}
					output.push_str("</");
					output.push_str(el.tag_name());
					output.push('>');
				}
			}
			View::Text(text) => {
				output.push_str(&html_escape(text));
			}
			View::Fragment(children) => {
				for child in children {
					child.write_html(output);
				}
			}
			View::Empty => {}
		}
	}

	/// Mounts the view under a DOM element (client-side only).
	#[cfg(target_arch = "wasm32")]
	pub fn mount(&self, parent: &web_sys::Element) -> Result<(), DomError> {
		let document = crate::dom::document()?;

		match self {
			View::Element(el) => {
				let element = document
					.create_element(el.tag_name())
					.map_err(DomError::from_js)?;

				for (name, value) in el.attrs() {
					element
						.set_attribute(name, value)
						.map_err(DomError::from_js)?;
				}

				for child in el.child_views() {
					child.mount(&element)?;
				}

				parent.append_child(&element).map_err(DomError::from_js)?;
			}
			View::Text(text) => {
				let text_node = document.create_text_node(text);
				parent.append_child(&text_node).map_err(DomError::from_js)?;
			}
			View::Fragment(children) => {
				for child in children {
					child.mount(parent)?;
				}
			}
			View::Empty => {}
		}

		Ok(())
	}
}

/// Trait for types that can be converted into a View.
pub trait IntoView {
	/// Converts self into a View.
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::Text(Cow::Owned(self))
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoView> IntoView for Option<T> {
	fn into_view(self) -> View {
		match self {
			Some(v) => v.into_view(),
			None => View::Empty,
		}
	}
}

impl<T: IntoView> IntoView for Vec<T> {
	fn into_view(self) -> View {
		View::Fragment(self.into_iter().map(|v| v.into_view()).collect())
	}
}

impl IntoView for () {
	fn into_view(self) -> View {
		View::Empty
	}
}

impl<A: IntoView, B: IntoView> IntoView for (A, B) {
	fn into_view(self) -> View {
		View::Fragment(vec![self.0.into_view(), self.1.into_view()])
	}
}

impl<A: IntoView, B: IntoView, C: IntoView> IntoView for (A, B, C) {
	fn into_view(self) -> View {
		View::Fragment(vec![
			self.0.into_view(),
			self.1.into_view(),
			self.2.into_view(),
		])
	}
}

/// Escapes HTML special characters.
fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_element_view_creation() {
		let el = ElementView::new("div");
		assert_eq!(el.tag_name(), "div");
		assert!(!el.is_void());
		assert!(el.attrs().is_empty());
		assert!(el.child_views().is_empty());
	}

	#[test]
	fn test_void_element_detection() {
		assert!(ElementView::new("br").is_void());
		assert!(ElementView::new("meta").is_void());
		assert!(!ElementView::new("a").is_void());
		assert!(!ElementView::new("div").is_void());
	}

	#[test]
	fn test_render_simple_element() {
		let view = ElementView::new("div").into_view();
		assert_eq!(view.render_to_string(), "<div></div>");
	}

	#[test]
	fn test_render_element_with_attrs() {
		let view = ElementView::new("a")
			.attr("href", "/about")
			.attr("class", "nav")
			.into_view();
		let html = view.render_to_string();
		assert!(html.contains("href=\"/about\""));
		assert!(html.contains("class=\"nav\""));
	}

	#[test]
	fn test_render_void_element() {
		let view = ElementView::new("br").into_view();
		assert_eq!(view.render_to_string(), "<br />");
	}

	#[test]
	fn test_render_nested_elements() {
		let view = ElementView::new("nav")
			.child(ElementView::new("a").attr("href", "/").child("Home"))
			.into_view();
		assert_eq!(
			view.render_to_string(),
			"<nav><a href=\"/\">Home</a></nav>"
		);
	}

	#[test]
	fn test_render_text_with_escaping() {
		let view = View::text("<script>alert('xss')</script>");
		assert_eq!(
			view.render_to_string(),
			"&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;"
		);
	}

	#[test]
	fn test_attr_value_escaping() {
		let view = ElementView::new("a")
			.attr("href", "/search?a=1&b=2")
			.into_view();
		assert!(view.render_to_string().contains("a=1&amp;b=2"));
	}

	#[test]
	fn test_render_fragment() {
		let view = View::fragment(["One", "Two", "Three"]);
		assert_eq!(view.render_to_string(), "OneTwoThree");
	}

	#[test]
	fn test_render_empty() {
		assert_eq!(View::empty().render_to_string(), "");
	}

	#[test]
	fn test_into_view_option() {
		assert_eq!(Some("Hello").into_view().render_to_string(), "Hello");
		assert_eq!(None::<String>.into_view().render_to_string(), "");
	}

	#[test]
	fn test_into_view_vec() {
		assert_eq!(vec!["A", "B"].into_view().render_to_string(), "AB");
	}

	#[test]
	fn test_into_view_tuple() {
		let view = ("Hello, ", "World!").into_view();
		assert_eq!(view.render_to_string(), "Hello, World!");
	}

	#[test]
	fn test_view_clone() {
		let view = ElementView::new("div").child("x").into_view();
		let copy = view.clone();
		assert_eq!(view.render_to_string(), copy.render_to_string());
	}

	#[test]
	fn test_html_escape_borrows_when_clean() {
		assert!(matches!(html_escape("plain"), Cow::Borrowed(_)));
		assert!(matches!(html_escape("a & b"), Cow::Owned(_)));
	}
}
