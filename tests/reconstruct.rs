mod common;

use common::{counts, palette_index, physical_palettes, raw_color, sprite_record, sprite_store, tile_page, words, StyleBuilder};
use gbh_style::stygfx::bitmap::{reconstruct, reconstruct_vehicle_remaps};
use gbh_style::stygfx::palette::Color;
use gbh_style::{decode, Error, Style};

fn color(p: usize, c: usize) -> Color {
    Color::from_raw(raw_color(p, c))
}

fn sprite_style(palx: Vec<u8>, deltas: &[u8], delta_sets: &[u8]) -> Vec<u8> {
    StyleBuilder::new()
        .chunk(b"PALX", &palx)
        .chunk(b"PPAL", &physical_palettes(1))
        .chunk(b"PALB", &counts(&[ 16, 2, 1, 0, 0, 0, 0, 0 ]))
        .chunk(b"TILE", &tile_page())
        .chunk(b"SPRG", &sprite_store(8))
        .chunk(b"SPRX", &[ sprite_record(0, 4, 4), sprite_record(0x103, 3, 2) ].concat())
        .chunk(b"SPRB", &counts(&[ 2, 0, 0, 0, 0, 0 ]))
        .chunk(b"DELS", deltas)
        .chunk(b"DELX", delta_sets)
        .build()
}

fn delta_set(sprite: u16, sizes: &[u16]) -> Vec<u8> {
    let mut data = words(&[ sprite ]);
    data.extend_from_slice(&[ sizes.len() as u8, 0 ]);
    data.extend_from_slice(&words(sizes));
    data
}

#[test]
fn single_physical_palette_colours_everything() {
    let data = sprite_style(palette_index(|_| 9), &[], &[]);
    let bitmaps = decode(&data).unwrap();
    assert_eq!(bitmaps.tiles.len(), 16);
    assert_eq!(bitmaps.sprites.len(), 2);
    let all = bitmaps.tiles.iter().chain(bitmaps.sprites.iter());
    for bitmap in all {
        assert!(bitmap.pixels.iter().all(|c| c.g == 9 && c.a == 0xff));
    }
}

#[test]
fn tile_quadrants_keep_their_markers() {
    let data = sprite_style(palette_index(|v| v as u16 % 64), &[], &[]);
    let bitmaps = decode(&data).unwrap();
    for (n, tile) in bitmaps.tiles.iter().enumerate() {
        assert_eq!((tile.width, tile.height), (64, 64));
        assert_eq!(tile.pixel(0, 0), color(n, 100 + n));
    }
}

#[test]
fn sprite_reads_block_with_store_stride() {
    let data = sprite_style(palette_index(|v| v as u16 % 64), &[], &[]);
    let bitmaps = decode(&data).unwrap();

    // sprite 0 uses virtual palette 16 (after the 16 tiles)
    let sprite = &bitmaps.sprites[0];
    assert_eq!((sprite.width, sprite.height), (4, 4));
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(sprite.pixel(x, y), color(16, x + y));
        }
    }

    // sprite 1 starts at (3, 1)
    let sprite = &bitmaps.sprites[1];
    assert_eq!(sprite.pixel(0, 0), color(17, 4));
    assert_eq!(sprite.pixel(2, 1), color(17, 7));
}

#[test]
fn delta_frames_patch_a_copy_of_their_sprite() {
    // frame 0: no runs; frame 1: 3 pixels from the start of row 0
    let deltas = [ 0, 0, 3, 200, 201, 202 ];
    let data = sprite_style(palette_index(|v| v as u16 % 64), &deltas, &delta_set(0, &[ 0, 6 ]));
    let bitmaps = decode(&data).unwrap();
    assert_eq!(bitmaps.delta_sources, vec![ 0, 0 ]);

    let base = &bitmaps.sprites[0];
    assert_eq!(&bitmaps.deltas[0], base);

    let patched = &bitmaps.deltas[1];
    for y in 0..4 {
        for x in 0..4 {
            if y == 0 && x < 3 {
                assert_eq!(patched.pixel(x, y), color(16, 200 + x));
            } else {
                assert_eq!(patched.pixel(x, y), base.pixel(x, y));
            }
        }
    }
}

#[test]
fn delta_frames_are_taken_from_the_store_in_order() {
    let deltas = [
        1, 0, 1, 50,
        0, 1, 1, 60,
    ];
    let mut sets = delta_set(1, &[ 4 ]);
    sets.extend_from_slice(&delta_set(0, &[ 4 ]));
    let data = sprite_style(palette_index(|v| v as u16 % 64), &deltas, &sets);
    let bitmaps = decode(&data).unwrap();
    assert_eq!(bitmaps.delta_sources, vec![ 1, 0 ]);
    assert_eq!(bitmaps.deltas[0].pixel(1, 0), color(17, 50));
    assert_eq!(bitmaps.deltas[1].pixel(0, 1), color(16, 60));
}

#[test]
fn dangling_physical_palette_is_out_of_range() {
    let data = sprite_style(palette_index(|_| 64), &[], &[]);
    let style = Style::parse(&data).unwrap();
    match reconstruct(&style) {
        Err(Error::IndexOutOfRange{ what, index, len }) => {
            assert_eq!((what, index, len), ("physical palette", 64, 64));
        },
        other => panic!("expected IndexOutOfRange, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn bitmaps_outlive_the_input_buffer() {
    let bitmaps = {
        let data = sprite_style(palette_index(|_| 3), &[], &[]);
        decode(&data).unwrap()
    };
    assert_eq!(bitmaps.sprites[0].pixel(0, 0), color(3, 0));
}

#[test]
fn vehicle_remaps_use_car_remap_palettes() {
    let mut data = sprite_style(palette_index(|v| v as u16 % 64), &[], &[]);
    let car = [ 7, 1, 3, 2, 1, 1, 99, 1, 0, 0, 0, 0, 0, 0, 0, 0 ];
    data.extend_from_slice(b"CARI");
    data.extend_from_slice(&(car.len() as u32).to_le_bytes());
    data.extend_from_slice(&car);

    let style = Style::parse(&data).unwrap();
    let remaps = reconstruct_vehicle_remaps(&style, &style.vehicles[0]).unwrap();
    assert_eq!(remaps.len(), 1);
    // car remap palettes start after 16 tile and 2 sprite palettes
    assert_eq!(remaps[0].pixel(0, 0), color(18, 4));
    assert_eq!((remaps[0].width, remaps[0].height), (3, 2));
}

#[test]
fn font_glyphs_map_to_sprites() {
    let data = StyleBuilder::new()
        .chunk(b"SPRB", &counts(&[ 10, 5, 0, 0, 0, 40 ]))
        .chunk(b"FONB", &words(&[ 2, 30, 10 ]))
        .build();
    let style = Style::parse(&data).unwrap();
    assert_eq!(style.font_base.glyph_sprite(&style.sprite_base, 1, 2).unwrap(), 15 + 30 + 2);
}
