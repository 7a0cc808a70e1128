mod circle;
mod image;
mod line;
mod polygon;
mod rect;
mod text;

pub use circle::CircleCmd;
pub use image::{Bitmap, ImageCmd};
pub use line::LineCmd;
pub use polygon::PolygonCmd;
pub use rect::RectCmd;
pub use text::TextCmd;
