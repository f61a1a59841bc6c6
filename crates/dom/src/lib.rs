mod color;
mod computed;
mod markup;
mod node;
mod serde_value;
mod style;

pub use crate::color::*;
pub use crate::computed::*;
pub use crate::node::*;
pub use crate::serde_value::*;
pub use crate::style::*;
