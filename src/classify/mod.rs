//! Token classification
//!
//! Decides whether a rendered token names a library type. The decision is a
//! pure function of the token text and the text of the token right after it;
//! applying the result to a page is the job of [`crate::markup`].

mod classifier;
mod type_names;

pub use classifier::{Classification, Classifier, CALL_PAREN};
pub use type_names::TypeNames;
