//! Contact form submission.

/// Form payload, endpoints and the submit flow.
pub mod form;
