use packed_struct::prelude::*;

use crate::styres::allocation::{cumulative, Allocation};
use crate::styres::chunk::ChunkKind;
use crate::styres::error::{Error, Result};
use crate::styres::reader::Reader;

pub const COLORS_PER_PALETTE: usize = 256;
pub const PALETTES_PER_PAGE: usize = 64;
pub const VIRTUAL_PALETTE_COUNT: usize = 16384;

const PALETTE_BYTES: usize = COLORS_PER_PALETTE * 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color{ r, g, b, a: 0xff }
    }

    /// Decodes a stored colour word (0x??RRGGBB). The format has no alpha.
    pub fn from_raw(raw: u32) -> Color {
        Color::rgb((raw >> 16) as u8, (raw >> 8) as u8, raw as u8)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhysicalPalette {
    pub colors: [ Color; COLORS_PER_PALETTE ],
}

impl Default for PhysicalPalette {
    fn default() -> Self {
        Self{ colors: [ Color::default(); COLORS_PER_PALETTE ] }
    }
}

/// Maps virtual palette numbers to physical palette numbers.
#[derive(Clone, Debug, Default)]
pub struct VirtualPaletteTable {
    entries: Vec<u16>,
}

impl VirtualPaletteTable {
    pub fn new(entries: Vec<u16>) -> Self {
        Self{ entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn physical(&self, virtual_index: usize) -> Result<usize> {
        match self.entries.get(virtual_index) {
            Some(&p) => Ok(p as usize),
            None => Err(Error::IndexOutOfRange{ what: "virtual palette", index: virtual_index, len: self.entries.len() }),
        }
    }
}

/// Resolves virtual palettes through the table into decoded physical palettes.
#[derive(Clone, Copy)]
pub struct PaletteLookup<'a> {
    pub table: &'a VirtualPaletteTable,
    pub palettes: &'a [PhysicalPalette],
}

impl<'a> PaletteLookup<'a> {
    pub fn new(table: &'a VirtualPaletteTable, palettes: &'a [PhysicalPalette]) -> Self {
        Self{ table, palettes }
    }

    pub fn resolve(&self, virtual_index: usize) -> Result<&'a PhysicalPalette> {
        let physical = self.table.physical(virtual_index)?;
        self.palettes.get(physical).ok_or(Error::IndexOutOfRange{
            what: "physical palette",
            index: physical,
            len: self.palettes.len(),
        })
    }
}

#[derive(PackedStruct)]
#[packed_struct(endian="lsb")]
pub struct PaletteCounts {
    pub tile: u16,
    pub sprite: u16,
    pub car_remap: u16,
    pub ped_remap: u16,
    pub code_object_remap: u16,
    pub map_object_remap: u16,
    pub user_remap: u16,
    pub font_remap: u16,
}

/// Partition of the virtual palette space among asset classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaletteBase {
    pub tile: Allocation,
    pub sprite: Allocation,
    pub car_remap: Allocation,
    pub ped_remap: Allocation,
    pub code_object_remap: Allocation,
    pub map_object_remap: Allocation,
    pub user_remap: Allocation,
    pub font_remap: Allocation,
}

impl From<&PaletteCounts> for PaletteBase {
    fn from(c: &PaletteCounts) -> Self {
        let a = cumulative(&[
            c.tile, c.sprite, c.car_remap, c.ped_remap,
            c.code_object_remap, c.map_object_remap, c.user_remap, c.font_remap,
        ]);
        PaletteBase{
            tile: a[0],
            sprite: a[1],
            car_remap: a[2],
            ped_remap: a[3],
            code_object_remap: a[4],
            map_object_remap: a[5],
            user_remap: a[6],
            font_remap: a[7],
        }
    }
}

pub fn read_virtual_palette_table(rdr: &mut Reader) -> Result<VirtualPaletteTable> {
    ChunkKind::PaletteIndex.expect_length(rdr, VIRTUAL_PALETTE_COUNT * 2)?;
    let entries = rdr.read_many::<u16>(VIRTUAL_PALETTE_COUNT)?;
    Ok(VirtualPaletteTable::new(entries))
}

pub fn read_physical_palettes(rdr: &mut Reader) -> Result<Vec<PhysicalPalette>> {
    let kind = ChunkKind::PhysicalPalettes;
    let count = kind.expect_multiple(rdr, PALETTE_BYTES)?;
    kind.expect_multiple(rdr, PALETTE_BYTES * PALETTES_PER_PAGE)?;

    // Within a page the palettes are interleaved: colour 0 of palettes
    // 0..63, then colour 1 of palettes 0..63, and so on.
    let mut palettes = vec![ PhysicalPalette::default(); count ];
    for page in 0..(count / PALETTES_PER_PAGE) {
        for color in 0..COLORS_PER_PALETTE {
            for n in 0..PALETTES_PER_PAGE {
                let raw = rdr.read::<u32>()?;
                palettes[page * PALETTES_PER_PAGE + n].colors[color] = Color::from_raw(raw);
            }
        }
    }
    Ok(palettes)
}

pub fn read_palette_base(rdr: &mut Reader) -> Result<PaletteBase> {
    ChunkKind::PaletteBase.expect_length(rdr, 16)?;
    let counts = PaletteCounts::unpack_from_slice(rdr.read_bytes(16)?)
        .map_err(|e| Error::Layout{ what: "palette base", message: format!("{:?}", e) })?;
    Ok(PaletteBase::from(&counts))
}
