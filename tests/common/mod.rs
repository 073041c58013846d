#![allow(dead_code)]

pub const VERSION: u16 = 700;
pub const PAGE: usize = 256;

/// Assembles a style file in memory, one chunk at a time.
pub struct StyleBuilder {
    data: Vec<u8>,
}

impl StyleBuilder {
    pub fn new() -> Self {
        let mut data = b"GBST".to_vec();
        data.extend_from_slice(&VERSION.to_le_bytes());
        Self{ data }
    }

    pub fn chunk(mut self, tag: &[u8; 4], payload: &[u8]) -> Self {
        self.data.extend_from_slice(tag);
        self.data.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        self.data.extend_from_slice(payload);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

pub fn words(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Virtual palette table mapping virtual palette `v` to `map(v)`.
pub fn palette_index(map: impl Fn(usize) -> u16) -> Vec<u8> {
    let entries: Vec<u16> = (0..16384).map(map).collect();
    words(&entries)
}

/// Colour word stored for palette `p`, colour `c`: green carries the
/// palette number, blue the colour number.
pub fn raw_color(p: usize, c: usize) -> u32 {
    ((p as u32 & 0xff) << 8) | c as u32
}

/// Interleaved physical palette pages using `raw_color`.
pub fn physical_palettes(pages: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(pages * 64 * 1024);
    for page in 0..pages {
        for c in 0..256 {
            for p in 0..64 {
                data.extend_from_slice(&raw_color(page * 64 + p, c).to_le_bytes());
            }
        }
    }
    data
}

pub fn sprite_record(offset: u32, width: u8, height: u8) -> Vec<u8> {
    let mut data = offset.to_le_bytes().to_vec();
    data.extend_from_slice(&[ width, height, 0, 0 ]);
    data
}

/// Sprite store `rows` high where every byte is `(x + y) & 0xff`.
pub fn sprite_store(rows: usize) -> Vec<u8> {
    let mut data = vec![ 0u8; PAGE * rows ];
    for y in 0..rows {
        for x in 0..PAGE {
            data[y * PAGE + x] = ((x + y) & 0xff) as u8;
        }
    }
    data
}

/// One tile page whose 16 tiles are filled with `100 + tile number`.
pub fn tile_page() -> Vec<u8> {
    let mut page = vec![ 0u8; PAGE * PAGE ];
    for y in 0..PAGE {
        for x in 0..PAGE {
            page[y * PAGE + x] = (100 + (y / 64) * 4 + x / 64) as u8;
        }
    }
    page
}

pub fn counts(values: &[u16]) -> Vec<u8> {
    words(values)
}
