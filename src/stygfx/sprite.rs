use std::fmt;

use packed_struct::prelude::*;

use crate::styres::allocation::{cumulative, Allocation};
use crate::styres::chunk::ChunkKind;
use crate::styres::error::{Error, Result};
use crate::styres::reader::Reader;

/// Row stride of the sprite graphics store, in pixels.
pub const STORE_STRIDE: usize = 256;

const SPRITE_RECORD_SIZE: usize = 8;

#[derive(PackedStruct)]
#[packed_struct(endian="lsb")]
pub struct SpriteRecord {
    pub offset: u32,
    pub width: u8,
    pub height: u8,
    pub reserved: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteEntry {
    /// Byte offset of the top-left pixel in the sprite store.
    pub offset: u32,
    pub width: u8,
    pub height: u8,
}

impl SpriteEntry {
    pub fn origin(&self) -> (usize, usize) {
        let offset = self.offset as usize;
        (offset % STORE_STRIDE, offset / STORE_STRIDE)
    }
}

/// Indexed pixel data shared by all sprites.
#[derive(Clone, Debug, Default)]
pub struct SpriteStore {
    data: Vec<u8>,
}

impl SpriteStore {
    pub fn new(data: Vec<u8>) -> Self {
        Self{ data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copies out a sprite's palette indices, row-major, `width * height` bytes.
    pub fn indices(&self, entry: &SpriteEntry) -> Result<Vec<u8>> {
        let (width, height) = (entry.width as usize, entry.height as usize);
        let mut out = Vec::with_capacity(width * height);
        for y in 0..height {
            let start = entry.offset as usize + y * STORE_STRIDE;
            match self.data.get(start..start + width) {
                Some(row) => out.extend_from_slice(row),
                None => return Err(Error::IndexOutOfRange{
                    what: "sprite store",
                    index: start + width,
                    len: self.data.len(),
                }),
            }
        }
        Ok(out)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteCategory {
    Car,
    Pedestrian,
    CodeObject,
    MapObject,
    User,
    Font,
}

impl fmt::Display for SpriteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteCategory::Car => write!(f, "car"),
            SpriteCategory::Pedestrian => write!(f, "ped"),
            SpriteCategory::CodeObject => write!(f, "code_obj"),
            SpriteCategory::MapObject => write!(f, "map_obj"),
            SpriteCategory::User => write!(f, "user"),
            SpriteCategory::Font => write!(f, "font"),
        }
    }
}

const SPRITE_CATEGORIES: [SpriteCategory; 6] = [
    SpriteCategory::Car,
    SpriteCategory::Pedestrian,
    SpriteCategory::CodeObject,
    SpriteCategory::MapObject,
    SpriteCategory::User,
    SpriteCategory::Font,
];

#[derive(PackedStruct)]
#[packed_struct(endian="lsb")]
pub struct SpriteCounts {
    pub car: u16,
    pub ped: u16,
    pub code_object: u16,
    pub map_object: u16,
    pub user: u16,
    pub font: u16,
}

/// Partition of the sprite index space among sprite categories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpriteBase {
    pub car: Allocation,
    pub pedestrian: Allocation,
    pub code_object: Allocation,
    pub map_object: Allocation,
    pub user: Allocation,
    pub font: Allocation,
}

impl From<&SpriteCounts> for SpriteBase {
    fn from(c: &SpriteCounts) -> Self {
        let a = cumulative(&[ c.car, c.ped, c.code_object, c.map_object, c.user, c.font ]);
        SpriteBase{
            car: a[0],
            pedestrian: a[1],
            code_object: a[2],
            map_object: a[3],
            user: a[4],
            font: a[5],
        }
    }
}

impl SpriteBase {
    pub fn allocation(&self, category: SpriteCategory) -> Allocation {
        match category {
            SpriteCategory::Car => self.car,
            SpriteCategory::Pedestrian => self.pedestrian,
            SpriteCategory::CodeObject => self.code_object,
            SpriteCategory::MapObject => self.map_object,
            SpriteCategory::User => self.user,
            SpriteCategory::Font => self.font,
        }
    }

    /// Category of an absolute sprite index, and its number within that category.
    pub fn classify(&self, index: usize) -> Option<(SpriteCategory, usize)> {
        SPRITE_CATEGORIES.iter()
            .map(|&c| (c, self.allocation(c)))
            .find(|(_, a)| a.contains(index))
            .map(|(c, a)| (c, index - a.offset))
    }
}

pub fn read_sprite_store(rdr: &mut Reader) -> Result<SpriteStore> {
    let data = rdr.read_bytes(rdr.len())?;
    Ok(SpriteStore::new(data.to_vec()))
}

pub fn read_sprite_entries(rdr: &mut Reader) -> Result<Vec<SpriteEntry>> {
    let count = ChunkKind::SpriteIndex.expect_multiple(rdr, SPRITE_RECORD_SIZE)?;
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let record = SpriteRecord::unpack_from_slice(rdr.read_bytes(SPRITE_RECORD_SIZE)?)
            .map_err(|e| Error::Layout{ what: "sprite record", message: format!("{:?}", e) })?;
        entries.push(SpriteEntry{ offset: record.offset, width: record.width, height: record.height });
    }
    Ok(entries)
}

pub fn read_sprite_base(rdr: &mut Reader) -> Result<SpriteBase> {
    ChunkKind::SpriteBase.expect_length(rdr, 12)?;
    let counts = SpriteCounts::unpack_from_slice(rdr.read_bytes(12)?)
        .map_err(|e| Error::Layout{ what: "sprite base", message: format!("{:?}", e) })?;
    Ok(SpriteBase::from(&counts))
}
