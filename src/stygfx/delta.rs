use crate::stygfx::bitmap::Bitmap;
use crate::stygfx::palette::PhysicalPalette;
use crate::stygfx::sprite::STORE_STRIDE;
use crate::styres::error::Result;
use crate::styres::reader::Reader;

/// Patch bytes for every delta frame, back to back in delta index order.
#[derive(Clone, Debug, Default)]
pub struct DeltaStore {
    data: Vec<u8>,
}

/// One sprite and the byte lengths of the patches derived from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaSet {
    pub sprite: u16,
    pub sizes: Vec<u16>,
}

pub struct DeltaFrame<'a> {
    pub sprite: usize,
    pub patch: &'a [u8],
}

/// Skip forward, then overwrite `pixels.len()` pixels.
#[derive(Debug, PartialEq, Eq)]
pub struct PatchRun<'a> {
    pub skip: u16,
    pub pixels: &'a [u8],
}

impl DeltaStore {
    pub fn new(data: Vec<u8>) -> Self {
        Self{ data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Slices the store into one patch per frame, walking the sets in order.
    pub fn frames<'a>(&'a self, sets: &[DeltaSet]) -> Result<Vec<DeltaFrame<'a>>> {
        let mut rdr = Reader::new(&self.data);
        let mut frames = Vec::new();
        for set in sets {
            for &size in &set.sizes {
                let patch = rdr.read_bytes(size as usize)?;
                frames.push(DeltaFrame{ sprite: set.sprite as usize, patch });
            }
        }
        if !rdr.is_exhausted() {
            log::warn!("delta store has {} unreferenced bytes", rdr.remaining());
        }
        Ok(frames)
    }
}

pub fn read_delta_store(rdr: &mut Reader) -> Result<DeltaStore> {
    let data = rdr.read_bytes(rdr.len())?;
    Ok(DeltaStore::new(data.to_vec()))
}

/// Reads delta sets until the chunk runs out. Sets are pushed as they
/// complete, so a truncated trailing set leaves the earlier ones in `out`.
pub fn read_delta_sets(rdr: &mut Reader, out: &mut Vec<DeltaSet>) -> Result<()> {
    while !rdr.is_exhausted() {
        let sprite = rdr.read::<u16>()?;
        let count = rdr.read::<u8>()? as usize;
        rdr.skip(1)?;
        let sizes = rdr.read_many::<u16>(count)?;
        out.push(DeltaSet{ sprite, sizes });
    }
    Ok(())
}

pub fn parse_patch(patch: &[u8]) -> Result<Vec<PatchRun<'_>>> {
    let mut rdr = Reader::new(patch);
    let mut runs = Vec::new();
    while !rdr.is_exhausted() {
        let skip = rdr.read::<u16>()?;
        let length = rdr.read::<u8>()? as usize;
        let pixels = rdr.read_bytes(length)?;
        runs.push(PatchRun{ skip, pixels });
    }
    Ok(runs)
}

/// Overwrites the runs of a patch onto `bitmap`. Positions are in the
/// sprite store raster, so rows are `STORE_STRIDE` apart.
pub fn apply_patch(bitmap: &mut Bitmap, runs: &[PatchRun], palette: &PhysicalPalette) -> Result<()> {
    let mut pos: usize = 0;
    for run in runs {
        pos += run.skip as usize;
        let (x, y) = (pos % STORE_STRIDE, pos / STORE_STRIDE);
        for (n, &index) in run.pixels.iter().enumerate() {
            bitmap.set_pixel(x + n, y, palette.colors[index as usize])?;
        }
        pos += run.pixels.len();
    }
    Ok(())
}
