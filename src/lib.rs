pub mod stydata;
pub mod stygfx;
pub mod styres;

pub use styres::error::{Error, Result};
pub use styres::style::Style;
pub use stygfx::bitmap::{Bitmap, StyleBitmaps};

/// Parses a style file and reconstructs every tile, sprite and delta frame.
pub fn decode(data: &[u8]) -> Result<StyleBitmaps> {
    let style = Style::parse(data)?;
    stygfx::bitmap::reconstruct(&style)
}
