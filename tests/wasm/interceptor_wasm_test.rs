//! In-browser checks for the delegated click interceptor.
//!
//! Run with: wasm-pack test --chrome --headless

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use montgomery::router::intercept;
use montgomery::{NavigationRequest, Router, View};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
	web_sys::window().unwrap().document().unwrap()
}

/// Appends an anchor to the document body and returns it.
fn append_anchor(href: &str) -> web_sys::HtmlAnchorElement {
	let document = document();
	let anchor: web_sys::HtmlAnchorElement = document
		.create_element("a")
		.unwrap()
		.dyn_into()
		.unwrap();
	anchor.set_attribute("href", href).unwrap();
	document.body().unwrap().append_child(&anchor).unwrap();
	anchor
}

fn click_event(init: &web_sys::MouseEventInit) -> web_sys::MouseEvent {
	init.set_bubbles(true);
	init.set_cancelable(true);
	web_sys::MouseEvent::new_with_mouse_event_init_dict("click", init).unwrap()
}

#[wasm_bindgen_test]
fn plain_click_is_intercepted_and_default_suppressed() {
	let recorded: Rc<RefCell<Option<NavigationRequest>>> = Rc::new(RefCell::new(None));

	let handle = {
		let recorded = Rc::clone(&recorded);
		intercept::install(move |request| {
			*recorded.borrow_mut() = Some(request);
		})
		.unwrap()
	};

	let anchor = append_anchor("/somewhere");
	let event = click_event(&web_sys::MouseEventInit::new());
	let not_canceled = anchor.dispatch_event(&event).unwrap();

	// preventDefault was called, so dispatch reports cancellation.
	assert!(!not_canceled);
	assert_eq!(
		recorded.borrow().as_ref().map(|r| r.to.clone()),
		Some("/somewhere".to_string())
	);

	anchor.remove();
	drop(handle);
}

#[wasm_bindgen_test]
fn modifier_click_is_left_to_browser() {
	let recorded: Rc<RefCell<Option<NavigationRequest>>> = Rc::new(RefCell::new(None));

	let handle = {
		let recorded = Rc::clone(&recorded);
		intercept::install(move |request| {
			*recorded.borrow_mut() = Some(request);
		})
		.unwrap()
	};

	let anchor = append_anchor("/somewhere");
	let init = web_sys::MouseEventInit::new();
	init.set_ctrl_key(true);
	let event = click_event(&init);
	let not_canceled = anchor.dispatch_event(&event).unwrap();

	assert!(not_canceled);
	assert!(recorded.borrow().is_none());

	anchor.remove();
	drop(handle);
}

#[wasm_bindgen_test]
fn target_attribute_is_left_to_browser() {
	let recorded: Rc<RefCell<Option<NavigationRequest>>> = Rc::new(RefCell::new(None));

	let handle = {
		let recorded = Rc::clone(&recorded);
		intercept::install(move |request| {
			*recorded.borrow_mut() = Some(request);
		})
		.unwrap()
	};

	let anchor = append_anchor("/somewhere");
	anchor.set_attribute("target", "_blank").unwrap();
	let not_canceled = anchor
		.dispatch_event(&click_event(&web_sys::MouseEventInit::new()))
		.unwrap();

	assert!(not_canceled);
	assert!(recorded.borrow().is_none());

	anchor.remove();
	drop(handle);
}

#[wasm_bindgen_test]
fn dropped_handle_stops_intercepting() {
	let recorded: Rc<RefCell<Option<NavigationRequest>>> = Rc::new(RefCell::new(None));

	let handle = {
		let recorded = Rc::clone(&recorded);
		intercept::install(move |request| {
			*recorded.borrow_mut() = Some(request);
		})
		.unwrap()
	};
	drop(handle);

	let anchor = append_anchor("/somewhere");
	let not_canceled = anchor
		.dispatch_event(&click_event(&web_sys::MouseEventInit::new()))
		.unwrap();

	assert!(not_canceled);
	assert!(recorded.borrow().is_none());

	anchor.remove();
}

#[wasm_bindgen_test]
fn router_click_updates_current_path_signal() {
	let router = Arc::new(
		Router::new()
			.route("/", || View::text("Home"))
			.group("/post", |g| g.route(":id", || View::text("Post"))),
	);
	let lifecycle = Router::start(Arc::clone(&router)).unwrap();

	let anchor = append_anchor("/post/1");
	let not_canceled = anchor
		.dispatch_event(&click_event(&web_sys::MouseEventInit::new()))
		.unwrap();

	assert!(!not_canceled);
	assert_eq!(router.current_path().get(), "/post/1");
	assert_eq!(
		router.current_params().get().get("id"),
		Some(&"1".to_string())
	);

	anchor.remove();
	drop(lifecycle);
}
