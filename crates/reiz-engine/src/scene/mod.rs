//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands in pixel space
//! - keep paint order deterministic (insertion order)
//! - keep shape-specific helpers isolated per shape file under `scene::shapes`

mod cmd;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::DrawList;
pub use shapes::{Bitmap, CircleCmd, ImageCmd, LineCmd, PolygonCmd, RectCmd, TextCmd};
