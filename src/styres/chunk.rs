use std::fmt;

use crate::styres::error::{Error, Result};
use crate::styres::reader::Reader;

pub const STYLE_MAGIC: [u8; 4] = *b"GBST";
pub const CHUNK_HEADER_SIZE: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkKind {
    PaletteIndex,
    PhysicalPalettes,
    PaletteBase,
    SpriteBase,
    Tiles,
    SpriteGraphics,
    SpriteIndex,
    DeltaStore,
    DeltaIndex,
    FontBase,
    CarInfo,
    ObjectInfo,
    Recycling,
    SurfaceSpec,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Exact size (or exact record multiple) known up front; a mismatch is fatal.
    Fixed,
    /// Self-delimiting records read against the chunk boundary; a mismatch is a warning.
    Variable,
    /// Opaque bytes, any length.
    Blob,
}

const CHUNK_TABLE: [([u8; 4], ChunkKind); 14] = [
    (*b"PALX", ChunkKind::PaletteIndex),
    (*b"PPAL", ChunkKind::PhysicalPalettes),
    (*b"PALB", ChunkKind::PaletteBase),
    (*b"SPRB", ChunkKind::SpriteBase),
    (*b"TILE", ChunkKind::Tiles),
    (*b"SPRG", ChunkKind::SpriteGraphics),
    (*b"SPRX", ChunkKind::SpriteIndex),
    (*b"DELS", ChunkKind::DeltaStore),
    (*b"DELX", ChunkKind::DeltaIndex),
    (*b"FONB", ChunkKind::FontBase),
    (*b"CARI", ChunkKind::CarInfo),
    (*b"OBJI", ChunkKind::ObjectInfo),
    (*b"RECY", ChunkKind::Recycling),
    (*b"SPEC", ChunkKind::SurfaceSpec),
];

// PSX tile data; present in some files, never decoded
pub const RESERVED_TAGS: [[u8; 4]; 1] = [ *b"PSXT" ];

impl ChunkKind {
    pub fn from_tag(tag: &[u8; 4]) -> Option<ChunkKind> {
        CHUNK_TABLE.iter().find(|(t, _)| t == tag).map(|&(_, kind)| kind)
    }

    pub fn tag(&self) -> [u8; 4] {
        CHUNK_TABLE.iter().find(|(_, k)| k == self).map(|&(t, _)| t).unwrap_or(*b"????")
    }

    pub fn layout(&self) -> Layout {
        match self {
            ChunkKind::PaletteIndex |
            ChunkKind::PhysicalPalettes |
            ChunkKind::PaletteBase |
            ChunkKind::SpriteBase |
            ChunkKind::Tiles |
            ChunkKind::SpriteIndex |
            ChunkKind::ObjectInfo => Layout::Fixed,
            ChunkKind::DeltaIndex |
            ChunkKind::FontBase |
            ChunkKind::CarInfo |
            ChunkKind::Recycling |
            ChunkKind::SurfaceSpec => Layout::Variable,
            ChunkKind::SpriteGraphics |
            ChunkKind::DeltaStore => Layout::Blob,
        }
    }

    /// Fails with `SizeMismatch` unless the chunk is exactly `expected` bytes.
    pub fn expect_length(&self, rdr: &Reader, expected: usize) -> Result<()> {
        if rdr.len() != expected {
            return Err(self.size_mismatch(rdr.len(), expected));
        }
        Ok(())
    }

    /// Fails with `SizeMismatch` unless the chunk is a whole number of `unit`-sized records.
    pub fn expect_multiple(&self, rdr: &Reader, unit: usize) -> Result<usize> {
        if rdr.len() % unit != 0 {
            return Err(self.size_mismatch(rdr.len(), rdr.len() - rdr.len() % unit));
        }
        Ok(rdr.len() / unit)
    }

    pub fn size_mismatch(&self, declared: usize, expected: usize) -> Error {
        Error::SizeMismatch{ chunk: tag_name(&self.tag()), declared, expected }
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", tag_name(&self.tag()))
    }
}

pub fn tag_name(tag: &[u8; 4]) -> String {
    tag.iter().map(|&b| if b.is_ascii_graphic() { b as char } else { '?' }).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleHeader {
    pub version: u16,
}

impl StyleHeader {
    /// Checks the magic before consuming anything, then reads the version.
    pub fn read(rdr: &mut Reader) -> Result<StyleHeader> {
        let mut found = [ 0u8; 4 ];
        found.copy_from_slice(rdr.peek_bytes(4)?);
        if found != STYLE_MAGIC {
            return Err(Error::Format{ expected: STYLE_MAGIC, found });
        }
        rdr.skip(4)?;
        let version = rdr.read::<u16>()?;
        Ok(StyleHeader{ version })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkHeader {
    pub tag: [u8; 4],
    pub length: u32,
}

impl ChunkHeader {
    pub fn read(rdr: &mut Reader) -> Result<ChunkHeader> {
        let tag = rdr.read_tag()?;
        let length = rdr.read::<u32>()?;
        Ok(ChunkHeader{ tag, length })
    }

    pub fn kind(&self) -> Option<ChunkKind> {
        ChunkKind::from_tag(&self.tag)
    }

    pub fn is_reserved(&self) -> bool {
        RESERVED_TAGS.contains(&self.tag)
    }

    pub fn name(&self) -> String {
        tag_name(&self.tag)
    }
}

pub struct ChunkEntry {
    /// Absolute offset of the chunk header.
    pub offset: usize,
    pub header: ChunkHeader,
}

/// Walks the chunk sequence without decoding any payload.
pub fn list_chunks(data: &[u8]) -> Result<(StyleHeader, Vec<ChunkEntry>)> {
    let mut rdr = Reader::new(data);
    let header = StyleHeader::read(&mut rdr)?;
    let mut entries = Vec::new();
    while !rdr.is_exhausted() {
        let offset = rdr.offset();
        let chunk = ChunkHeader::read(&mut rdr)?;
        rdr.skip(chunk.length as usize)?;
        entries.push(ChunkEntry{ offset, header: chunk });
    }
    Ok((header, entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_table_round_trips_tags() {
        for (tag, kind) in CHUNK_TABLE.iter() {
            assert_eq!(ChunkKind::from_tag(tag), Some(*kind));
            assert_eq!(&kind.tag(), tag);
        }
        assert_eq!(ChunkKind::from_tag(b"PSXT"), None);
        assert_eq!(ChunkKind::from_tag(b"ZZZZ"), None);
    }

    #[test]
    fn bad_magic_consumes_nothing() {
        let data = *b"GBSX\x07\x02";
        let mut rdr = Reader::new(&data);
        match StyleHeader::read(&mut rdr) {
            Err(Error::Format{ found, .. }) => assert_eq!(&found, b"GBSX"),
            _ => panic!("expected Format error"),
        }
        assert_eq!(rdr.position(), 0);
    }

    #[test]
    fn lists_chunks_with_offsets() {
        let mut data = b"GBST\x07\x02".to_vec();
        data.extend_from_slice(b"RECY\x02\x00\x00\x00\x01\xff");
        data.extend_from_slice(b"ABCD\x00\x00\x00\x00");
        let (header, entries) = list_chunks(&data).unwrap();
        assert_eq!(header.version, 0x207);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].offset, 6);
        assert_eq!(entries[0].header.kind(), Some(ChunkKind::Recycling));
        assert_eq!(entries[1].offset, 16);
        assert_eq!(entries[1].header.name(), "ABCD");
    }

    #[test]
    fn multiple_check_reports_rounded_size() {
        let data = [ 0u8; 10 ];
        let rdr = Reader::new(&data);
        assert_eq!(ChunkKind::SpriteIndex.expect_multiple(&rdr, 5).unwrap(), 2);
        match ChunkKind::SpriteIndex.expect_multiple(&rdr, 8) {
            Err(Error::SizeMismatch{ chunk, declared, expected }) => {
                assert_eq!((chunk.as_str(), declared, expected), ("SPRX", 10, 8));
            },
            _ => panic!("expected SizeMismatch"),
        }
    }
}
