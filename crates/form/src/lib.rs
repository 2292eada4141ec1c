//! Headless contact form used by the website front end.
//!
//! [`ContactForm`] owns the field values and the idle / submitting / submitted
//! state; the network call goes through a [`ContactApi`].

mod api;
mod form;

pub use api::*;
pub use form::*;
