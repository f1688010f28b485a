//! Component system.
//!
//! A minimal view layer: [`View`] is the renderable tree, [`ElementView`]
//! builds DOM elements, [`IntoView`] converts common types, and
//! [`Component`] is the trait the router's navigation components
//! implement.

mod into_view;
mod traits;

pub use into_view::{ElementView, IntoView, View};
pub use traits::Component;
