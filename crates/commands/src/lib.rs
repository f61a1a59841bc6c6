mod apply;
mod blocks;
mod classify;
mod command;
mod editor;
mod geometry;
mod mutate;
mod ranges;
mod traverse;
mod values;

pub use crate::apply::*;
pub use crate::blocks::*;
pub use crate::classify::*;
pub use crate::command::*;
pub use crate::editor::*;
pub use crate::geometry::*;
pub use crate::mutate::*;
pub use crate::ranges::*;
pub use crate::traverse::*;
pub use crate::values::*;
