use crate::stydata::vehicle::VehicleInfo;
use crate::stygfx::delta::{apply_patch, parse_patch, DeltaSet, DeltaStore};
use crate::stygfx::palette::{Color, PaletteLookup, PhysicalPalette};
use crate::stygfx::sprite::{SpriteEntry, SpriteStore};
use crate::stygfx::tile::{Tile, TILE_SIZE};
use crate::styres::allocation::Allocation;
use crate::styres::error::{Error, Result};
use crate::styres::style::Style;

/// Fully resolved RGBA image, row-major. Owns its pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self{ width, height, pixels: vec![ Color::default(); width * height ] }
    }

    pub fn from_indices(width: usize, height: usize, indices: &[u8], palette: &PhysicalPalette) -> Self {
        let pixels = indices.iter().map(|&i| palette.colors[i as usize]).collect();
        Self{ width, height, pixels }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfRange{
                what: "bitmap pixel",
                index: y * self.width + x,
                len: self.pixels.len(),
            });
        }
        self.pixels[y * self.width + x] = color;
        Ok(())
    }
}

/// Everything the pipeline produces for one style file.
#[derive(Debug, Default)]
pub struct StyleBitmaps {
    pub tiles: Vec<Bitmap>,
    pub sprites: Vec<Bitmap>,
    pub deltas: Vec<Bitmap>,
    /// Sprite index each entry of `deltas` was derived from.
    pub delta_sources: Vec<usize>,
}

pub fn reconstruct_tiles(tiles: &[Tile], palettes: Allocation, lookup: &PaletteLookup) -> Result<Vec<Bitmap>> {
    tiles.iter().enumerate().map(|(n, tile)| {
        let palette = lookup.resolve(palettes.offset + n)?;
        Ok(Bitmap::from_indices(TILE_SIZE, TILE_SIZE, &tile.indices, palette))
    }).collect()
}

pub fn render_sprite(store: &SpriteStore, entry: &SpriteEntry, palette: &PhysicalPalette) -> Result<Bitmap> {
    let indices = store.indices(entry)?;
    Ok(Bitmap::from_indices(entry.width as usize, entry.height as usize, &indices, palette))
}

pub fn reconstruct_sprites(store: &SpriteStore, entries: &[SpriteEntry], palettes: Allocation, lookup: &PaletteLookup) -> Result<Vec<Bitmap>> {
    entries.iter().enumerate().map(|(n, entry)| {
        let palette = lookup.resolve(palettes.offset + n)?;
        render_sprite(store, entry, palette)
    }).collect()
}

/// Builds every delta frame as a patched copy of its (already rendered) sprite.
/// Returns the frames and, in parallel, the sprite each came from.
pub fn reconstruct_deltas(store: &DeltaStore, sets: &[DeltaSet], sprites: &[Bitmap], palettes: Allocation, lookup: &PaletteLookup) -> Result<(Vec<Bitmap>, Vec<usize>)> {
    let mut frames = Vec::new();
    let mut sources = Vec::new();
    for frame in store.frames(sets)? {
        let base = sprites.get(frame.sprite).ok_or(Error::IndexOutOfRange{
            what: "delta sprite",
            index: frame.sprite,
            len: sprites.len(),
        })?;
        let palette = lookup.resolve(palettes.offset + frame.sprite)?;
        let runs = parse_patch(frame.patch)?;
        let mut bitmap = base.clone();
        apply_patch(&mut bitmap, &runs, palette)?;
        frames.push(bitmap);
        sources.push(frame.sprite);
    }
    Ok((frames, sources))
}

pub fn reconstruct(style: &Style) -> Result<StyleBitmaps> {
    let lookup = PaletteLookup::new(&style.palette_index, &style.palettes);
    let tiles = reconstruct_tiles(&style.tiles, style.palette_base.tile, &lookup)?;
    let sprites = reconstruct_sprites(&style.sprite_store, &style.sprites, style.palette_base.sprite, &lookup)?;
    let (deltas, delta_sources) = reconstruct_deltas(&style.delta_store, &style.deltas, &sprites, style.palette_base.sprite, &lookup)?;
    log::info!("reconstructed {} tiles, {} sprites, {} delta frames", tiles.len(), sprites.len(), deltas.len());
    Ok(StyleBitmaps{ tiles, sprites, deltas, delta_sources })
}

/// Renders a vehicle's sprite once per remap palette it lists.
pub fn reconstruct_vehicle_remaps(style: &Style, vehicle: &VehicleInfo) -> Result<Vec<Bitmap>> {
    let lookup = PaletteLookup::new(&style.palette_index, &style.palettes);
    let sprite = style.sprite_base.car.index(vehicle.sprite as usize, "car sprite")?;
    let entry = style.sprites.get(sprite).ok_or(Error::IndexOutOfRange{
        what: "sprite",
        index: sprite,
        len: style.sprites.len(),
    })?;
    vehicle.remaps.iter().map(|&remap| {
        let palette = lookup.resolve(style.palette_base.car_remap.offset + remap as usize)?;
        render_sprite(&style.sprite_store, entry, palette)
    }).collect()
}
