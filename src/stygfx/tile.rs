use crate::styres::chunk::ChunkKind;
use crate::styres::error::Result;
use crate::styres::reader::Reader;

pub const TILE_SIZE: usize = 64;
pub const PAGE_SIZE: usize = 256;

const TILES_PER_ROW: usize = PAGE_SIZE / TILE_SIZE;
const TILE_BYTES: usize = TILE_SIZE * TILE_SIZE;

/// 64x64 grid of palette indices, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub indices: Vec<u8>,
}

impl Tile {
    pub fn index_at(&self, x: usize, y: usize) -> u8 {
        self.indices[y * TILE_SIZE + x]
    }
}

/// Cuts tiles out of page data, treating the pages as one buffer
/// `PAGE_SIZE` pixels wide and four tiles across.
pub fn split_tiles(pages: &[u8]) -> Vec<Tile> {
    let count = pages.len() / TILE_BYTES;
    let mut tiles = Vec::with_capacity(count);
    for n in 0..count {
        let row = n / TILES_PER_ROW;
        let col = n % TILES_PER_ROW;
        let mut indices = vec![ 0u8; TILE_BYTES ];
        for y in 0..TILE_SIZE {
            let src = col * TILE_SIZE + (y + row * TILE_SIZE) * PAGE_SIZE;
            indices[y * TILE_SIZE..(y + 1) * TILE_SIZE].copy_from_slice(&pages[src..src + TILE_SIZE]);
        }
        tiles.push(Tile{ indices });
    }
    tiles
}

pub fn read_tiles(rdr: &mut Reader) -> Result<Vec<Tile>> {
    ChunkKind::Tiles.expect_multiple(rdr, PAGE_SIZE * PAGE_SIZE)?;
    let pages = rdr.read_bytes(rdr.len())?;
    Ok(split_tiles(pages))
}
