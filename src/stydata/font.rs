use crate::stygfx::sprite::SpriteBase;
use crate::styres::allocation::{cumulative, Allocation};
use crate::styres::error::{Error, Result};
use crate::styres::reader::Reader;

/// Per-font glyph ranges within the font sprites.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontBase {
    pub fonts: Vec<Allocation>,
}

impl FontBase {
    /// Absolute sprite index of character `ch` in font `font`.
    pub fn glyph_sprite(&self, sprite_base: &SpriteBase, font: usize, ch: usize) -> Result<usize> {
        let glyphs = self.fonts.get(font).ok_or(Error::IndexOutOfRange{
            what: "font",
            index: font,
            len: self.fonts.len(),
        })?;
        Ok(sprite_base.font.offset + glyphs.index(ch, "glyph")?)
    }
}

pub fn read_font_base(rdr: &mut Reader) -> Result<FontBase> {
    let count = rdr.read::<u16>()? as usize;
    let glyph_counts = rdr.read_many::<u16>(count)?;
    Ok(FontBase{ fonts: cumulative(&glyph_counts) })
}
