//! Generation - randomized creation of the flight corridor layout.

mod layout;

pub use layout::*;
