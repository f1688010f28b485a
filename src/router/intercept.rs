//! Global anchor-click interception.
//!
//! One delegated `click` listener on the document decides, for every
//! click on an anchor, whether the router takes over (History API
//! navigation, no document reload) or the browser keeps the click.
//!
//! The decision is a set of independent bail-out predicates evaluated
//! per click, implemented as the pure function [`bypass_reason`] so it
//! can be tested without a DOM. The browser keeps the click when any of
//! these holds:
//!
//! - an earlier handler already called `preventDefault`;
//! - a modifier key (Meta, Alt, Control, Shift) was held;
//! - the anchor carries a `target` attribute, a `download` attribute, or
//!   `external` among its `rel` tokens;
//! - the anchor's resolved origin differs from the document origin;
//! - the anchor has no `href` at all.
//!
//! Otherwise the listener calls `preventDefault` and hands the anchor's
//! path to the router. Exactly one decision is made per click; nothing
//! is queued or retried.

use crate::dom::{DomError, EventHandle};

/// Modifier-key state captured from a click event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
	/// Meta (Command on macOS) was held.
	pub meta: bool,
	/// Alt was held.
	pub alt: bool,
	/// Control was held.
	pub ctrl: bool,
	/// Shift was held.
	pub shift: bool,
}

impl ClickModifiers {
	/// Returns whether any modifier key was held.
	pub fn any(&self) -> bool {
		self.meta || self.alt || self.ctrl || self.shift
	}
}

/// Attribute snapshot of a clicked anchor element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorSnapshot {
	/// The raw `href` attribute, if present.
	pub href: Option<String>,
	/// The `target` attribute, if present.
	pub target: Option<String>,
	/// The `download` attribute, if present (empty string counts).
	pub download: Option<String>,
	/// The `rel` attribute, if present.
	pub rel: Option<String>,
	/// The anchor's resolved origin (from the URL the browser derived
	/// for the `href`).
	pub origin: Option<String>,
}

impl AnchorSnapshot {
	/// Creates a snapshot for a plain same-document anchor.
	pub fn with_href(href: impl Into<String>) -> Self {
		Self {
			href: Some(href.into()),
			..Self::default()
		}
	}

	fn rel_contains_external(&self) -> bool {
		self.rel
			.as_deref()
			.is_some_and(|rel| rel.split_ascii_whitespace().any(|token| token == "external"))
	}
}

/// Why a click was left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassReason {
	/// An earlier handler already called `preventDefault`.
	DefaultPrevented,
	/// A modifier key was held.
	ModifierKey,
	/// The anchor has no `href` attribute.
	NoHref,
	/// The anchor carries a `target` attribute.
	TargetAttr,
	/// The anchor carries a `download` attribute.
	DownloadAttr,
	/// The anchor's `rel` tokens include `external`.
	RelExternal,
	/// The anchor points at a different origin.
	CrossOrigin,
}

impl std::fmt::Display for BypassReason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let reason = match self {
			Self::DefaultPrevented => "default already prevented",
			Self::ModifierKey => "modifier key held",
			Self::NoHref => "anchor has no href",
			Self::TargetAttr => "anchor has a target attribute",
			Self::DownloadAttr => "anchor has a download attribute",
			Self::RelExternal => "rel includes 'external'",
			Self::CrossOrigin => "different origin",
		};
		write!(f, "{}", reason)
	}
}

/// Evaluates the bail-out predicates for a click.
///
/// Returns `Some(reason)` when the browser must keep the click and
/// `None` when the router intercepts it. The predicates form an
/// unordered set; which reason is reported when several hold is
/// unspecified.
pub fn bypass_reason(
	default_prevented: bool,
	modifiers: &ClickModifiers,
	anchor: &AnchorSnapshot,
	document_origin: &str,
) -> Option<BypassReason> {
	if default_prevented {
		return Some(BypassReason::DefaultPrevented);
	}
	if modifiers.any() {
		return Some(BypassReason::ModifierKey);
	}
	if anchor.href.is_none() {
		return Some(BypassReason::NoHref);
	}
	if anchor.target.is_some() {
		return Some(BypassReason::TargetAttr);
	}
	if anchor.download.is_some() {
		return Some(BypassReason::DownloadAttr);
	}
	if anchor.rel_contains_external() {
		return Some(BypassReason::RelExternal);
	}
	match anchor.origin.as_deref() {
		Some(origin) if origin != document_origin => Some(BypassReason::CrossOrigin),
		_ => None,
	}
}

/// An intercepted navigation, handed to the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
	/// Path (plus query and fragment) to navigate to.
	pub to: String,
	/// Whether to replace the current history entry instead of pushing
	/// (anchors rendered with `data-replace="true"`).
	pub replace: bool,
}

/// Installs the delegated click listener on the document.
///
/// `on_navigate` is invoked for every intercepted click. Dropping the
/// returned handle removes the listener; this is the teardown half of
/// the router's single registration step.
#[cfg(target_arch = "wasm32")]
pub fn install(
	on_navigate: impl Fn(NavigationRequest) + 'static,
) -> Result<EventHandle, DomError> {
	use wasm_bindgen::JsCast;

	use crate::dom::EventType;

	let document = crate::dom::document()?;
	let document_origin = crate::router::history::current_origin()?;
	let target: &web_sys::EventTarget = document.as_ref();

	EventHandle::attach(target, EventType::Click, move |event| {
		let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() else {
			return;
		};
		let Some(anchor) = find_anchor(&event) else {
			return;
		};

		let modifiers = ClickModifiers {
			meta: mouse.meta_key(),
			alt: mouse.alt_key(),
			ctrl: mouse.ctrl_key(),
			shift: mouse.shift_key(),
		};
		let snapshot = snapshot_anchor(&anchor);

		match bypass_reason(
			event.default_prevented(),
			&modifiers,
			&snapshot,
			&document_origin,
		) {
			Some(_reason) => {
				crate::debug_log!("click left to browser: {}", _reason);
			}
			None => {
				event.prevent_default();

				let mut to = anchor.pathname();
				to.push_str(&anchor.search());
				to.push_str(&anchor.hash());

				let replace =
					anchor.get_attribute("data-replace").as_deref() == Some("true");

				on_navigate(NavigationRequest { to, replace });
			}
		}
	})
}

/// Walks from the event target to the nearest enclosing anchor.
#[cfg(target_arch = "wasm32")]
fn find_anchor(event: &web_sys::Event) -> Option<web_sys::HtmlAnchorElement> {
	use wasm_bindgen::JsCast;

	let target = event.target()?;
	let element = target.dyn_into::<web_sys::Element>().ok()?;
	let anchor = element.closest("a").ok()??;
	anchor.dyn_into::<web_sys::HtmlAnchorElement>().ok()
}

#[cfg(target_arch = "wasm32")]
fn snapshot_anchor(anchor: &web_sys::HtmlAnchorElement) -> AnchorSnapshot {
	let origin = if anchor.get_attribute("href").is_some() {
		Some(anchor.origin())
	} else {
		None
	};

	AnchorSnapshot {
		href: anchor.get_attribute("href"),
		target: anchor.get_attribute("target"),
		download: anchor.get_attribute("download"),
		rel: anchor.get_attribute("rel"),
		origin,
	}
}

/// Installs the delegated click listener (non-WASM placeholder).
#[cfg(not(target_arch = "wasm32"))]
pub fn install(
	_on_navigate: impl Fn(NavigationRequest) + 'static,
) -> Result<EventHandle, DomError> {
	Ok(EventHandle::detached(crate::dom::EventType::Click))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	const ORIGIN: &str = "https://myapp.com";

	fn same_origin_anchor(href: &str) -> AnchorSnapshot {
		AnchorSnapshot {
			origin: Some(ORIGIN.to_string()),
			..AnchorSnapshot::with_href(href)
		}
	}

	#[test]
	fn test_plain_click_is_intercepted() {
		let anchor = same_origin_anchor("/about");
		let decision = bypass_reason(false, &ClickModifiers::default(), &anchor, ORIGIN);
		assert_eq!(decision, None);
	}

	#[test]
	fn test_prevented_default_bails_out() {
		let anchor = same_origin_anchor("/about");
		let decision = bypass_reason(true, &ClickModifiers::default(), &anchor, ORIGIN);
		assert_eq!(decision, Some(BypassReason::DefaultPrevented));
	}

	#[rstest]
	#[case(ClickModifiers { meta: true, ..Default::default() })]
	#[case(ClickModifiers { alt: true, ..Default::default() })]
	#[case(ClickModifiers { ctrl: true, ..Default::default() })]
	#[case(ClickModifiers { shift: true, ..Default::default() })]
	fn test_any_modifier_bails_out(#[case] modifiers: ClickModifiers) {
		let anchor = same_origin_anchor("/about");
		let decision = bypass_reason(false, &modifiers, &anchor, ORIGIN);
		assert_eq!(decision, Some(BypassReason::ModifierKey));
	}

	#[test]
	fn test_target_attribute_bails_out() {
		let anchor = AnchorSnapshot {
			target: Some("_blank".to_string()),
			..same_origin_anchor("/about")
		};
		let decision = bypass_reason(false, &ClickModifiers::default(), &anchor, ORIGIN);
		assert_eq!(decision, Some(BypassReason::TargetAttr));
	}

	#[test]
	fn test_download_attribute_bails_out() {
		// An empty download attribute still counts as present.
		let anchor = AnchorSnapshot {
			download: Some(String::new()),
			..same_origin_anchor("/report.pdf")
		};
		let decision = bypass_reason(false, &ClickModifiers::default(), &anchor, ORIGIN);
		assert_eq!(decision, Some(BypassReason::DownloadAttr));
	}

	#[rstest]
	#[case("external", true)]
	#[case("noopener external", true)]
	#[case("external noreferrer", true)]
	#[case("noopener", false)]
	#[case("externally", false)]
	fn test_rel_external_token(#[case] rel: &str, #[case] bails: bool) {
		let anchor = AnchorSnapshot {
			rel: Some(rel.to_string()),
			..same_origin_anchor("/about")
		};
		let decision = bypass_reason(false, &ClickModifiers::default(), &anchor, ORIGIN);
		assert_eq!(decision == Some(BypassReason::RelExternal), bails);
		if !bails {
			assert_eq!(decision, None);
		}
	}

	#[test]
	fn test_cross_origin_bails_out() {
		let anchor = AnchorSnapshot {
			origin: Some("https://example.org".to_string()),
			..AnchorSnapshot::with_href("https://example.org/x")
		};
		let decision = bypass_reason(false, &ClickModifiers::default(), &anchor, ORIGIN);
		assert_eq!(decision, Some(BypassReason::CrossOrigin));
	}

	#[test]
	fn test_missing_href_bails_out() {
		let anchor = AnchorSnapshot::default();
		let decision = bypass_reason(false, &ClickModifiers::default(), &anchor, ORIGIN);
		assert_eq!(decision, Some(BypassReason::NoHref));
	}

	#[test]
	fn test_unknown_origin_is_trusted() {
		// No resolved origin available: treat as same-document.
		let anchor = AnchorSnapshot::with_href("/about");
		let decision = bypass_reason(false, &ClickModifiers::default(), &anchor, ORIGIN);
		assert_eq!(decision, None);
	}

	#[test]
	fn test_modifiers_any() {
		assert!(!ClickModifiers::default().any());
		assert!(
			ClickModifiers {
				shift: true,
				..Default::default()
			}
			.any()
		);
	}

	#[test]
	fn test_bypass_reason_display() {
		assert_eq!(BypassReason::ModifierKey.to_string(), "modifier key held");
		assert_eq!(BypassReason::CrossOrigin.to_string(), "different origin");
	}

	#[test]
	fn test_install_non_wasm() {
		let handle = install(|_| {}).unwrap();
		assert_eq!(handle.event_type(), crate::dom::EventType::Click);
	}
}
