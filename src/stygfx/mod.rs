pub mod bitmap;
pub mod delta;
pub mod palette;
pub mod sprite;
pub mod tile;
