use crate::stydata::font::{read_font_base, FontBase};
use crate::stydata::object::{read_objects, ObjectInfo};
use crate::stydata::surface::{read_surfaces, Surfaces};
use crate::stydata::vehicle::{read_recyclable, read_vehicles, VehicleInfo};
use crate::stygfx::delta::{read_delta_sets, read_delta_store, DeltaSet, DeltaStore};
use crate::stygfx::palette::{read_palette_base, read_physical_palettes, read_virtual_palette_table, PaletteBase, PhysicalPalette, VirtualPaletteTable};
use crate::stygfx::sprite::{read_sprite_base, read_sprite_entries, read_sprite_store, SpriteBase, SpriteEntry, SpriteStore};
use crate::stygfx::tile::{read_tiles, Tile};
use crate::styres::chunk::{ChunkHeader, ChunkKind, Layout, StyleHeader};
use crate::styres::error::{Error, Result};
use crate::styres::reader::Reader;

/// Raw records of a style file, as stored. Nothing here borrows from the
/// input buffer; palettes are not applied yet (see `stygfx::bitmap`).
#[derive(Debug, Default)]
pub struct Style {
    /// Informational only; no alternate layouts are known.
    pub version: u16,
    pub palette_index: VirtualPaletteTable,
    pub palettes: Vec<PhysicalPalette>,
    pub palette_base: PaletteBase,
    pub tiles: Vec<Tile>,
    pub sprite_store: SpriteStore,
    pub sprites: Vec<SpriteEntry>,
    pub sprite_base: SpriteBase,
    pub delta_store: DeltaStore,
    pub deltas: Vec<DeltaSet>,
    pub font_base: FontBase,
    pub vehicles: Vec<VehicleInfo>,
    pub objects: Vec<ObjectInfo>,
    pub recyclable: Vec<u8>,
    pub surfaces: Surfaces,
    /// Non-fatal problems met while parsing (unknown chunks, sloppy chunk sizes).
    pub diagnostics: Vec<Error>,
}

impl Style {
    pub fn parse(data: &[u8]) -> Result<Style> {
        let mut rdr = Reader::new(data);
        let header = StyleHeader::read(&mut rdr)?;
        log::debug!("style file version {}", header.version);

        let mut style = Style{ version: header.version, ..Default::default() };
        while !rdr.is_exhausted() {
            let offset = rdr.offset();
            let chunk = ChunkHeader::read(&mut rdr)?;
            let mut payload = rdr.sub_reader(chunk.length as usize)?;

            let kind = match chunk.kind() {
                Some(kind) => kind,
                None if chunk.is_reserved() => {
                    log::debug!("skipping reserved chunk {} ({} bytes)", chunk.name(), chunk.length);
                    continue;
                },
                None => {
                    log::warn!("skipping unknown chunk {} at {:#x} ({} bytes)", chunk.name(), offset, chunk.length);
                    style.diagnostics.push(Error::UnknownChunk{ tag: chunk.name(), offset });
                    continue;
                }
            };

            log::debug!("chunk {} at {:#x}, {} bytes", kind, offset, chunk.length);
            let consumed = match style.read_chunk(kind, &mut payload) {
                Ok(()) => payload.position(),
                // reads that fail leave the position where the record broke off
                Err(Error::TruncatedInput{ .. }) if kind.layout() == Layout::Variable => payload.position(),
                Err(e) => return Err(e),
            };
            if consumed != payload.len() {
                let mismatch = kind.size_mismatch(payload.len(), consumed);
                if kind.layout() == Layout::Fixed {
                    return Err(mismatch);
                }
                log::warn!("{}", mismatch);
                style.diagnostics.push(mismatch);
            }
        }

        log::info!("parsed style: {} palettes, {} tiles, {} sprites, {} delta sets, {} vehicles",
            style.palettes.len(), style.tiles.len(), style.sprites.len(), style.deltas.len(), style.vehicles.len());
        Ok(style)
    }

    fn read_chunk(&mut self, kind: ChunkKind, rdr: &mut Reader) -> Result<()> {
        match kind {
            ChunkKind::PaletteIndex => { self.palette_index = read_virtual_palette_table(rdr)?; },
            ChunkKind::PhysicalPalettes => { self.palettes = read_physical_palettes(rdr)?; },
            ChunkKind::PaletteBase => { self.palette_base = read_palette_base(rdr)?; },
            ChunkKind::SpriteBase => { self.sprite_base = read_sprite_base(rdr)?; },
            ChunkKind::Tiles => { self.tiles = read_tiles(rdr)?; },
            ChunkKind::SpriteGraphics => { self.sprite_store = read_sprite_store(rdr)?; },
            ChunkKind::SpriteIndex => { self.sprites = read_sprite_entries(rdr)?; },
            ChunkKind::DeltaStore => { self.delta_store = read_delta_store(rdr)?; },
            ChunkKind::DeltaIndex => { read_delta_sets(rdr, &mut self.deltas)?; },
            ChunkKind::FontBase => { self.font_base = read_font_base(rdr)?; },
            ChunkKind::CarInfo => { read_vehicles(rdr, &mut self.vehicles)?; },
            ChunkKind::ObjectInfo => { self.objects = read_objects(rdr)?; },
            ChunkKind::Recycling => { self.recyclable = read_recyclable(rdr)?; },
            ChunkKind::SurfaceSpec => { self.surfaces = read_surfaces(rdr)?; },
        }
        Ok(())
    }
}
