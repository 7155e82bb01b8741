//! Cell values and column type tags.

mod element;
mod value;

pub use element::element_type;
pub use value::Cell;
