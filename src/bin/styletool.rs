extern crate gbh_style;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bmp::{px, Image, Pixel};
use clap::{Parser, Subcommand};

use gbh_style::{
    stygfx::bitmap::{self, Bitmap, StyleBitmaps},
    stygfx::palette::PaletteBase,
    stygfx::sprite::{SpriteBase, SpriteCategory},
    styres::allocation::Allocation,
    styres::chunk,
    Style,
};

#[derive(Subcommand)]
enum CliCommand {
    /// Lists the chunks in the style file
    List,
    /// Prints allocation tables and gameplay metadata
    Info,
    /// Writes tiles, sprites and delta frames as .bmp files
    Extract {
        /// Output directory
        out_dir: PathBuf,
        #[clap(long, default_value_t=false)]
        /// Only write tiles (combinable with the other selectors)
        tiles: bool,
        #[clap(long, default_value_t=false)]
        /// Only write sprites
        sprites: bool,
        #[clap(long, default_value_t=false)]
        /// Only write delta frames
        deltas: bool,
        #[clap(long, default_value_t=false)]
        /// Also write every vehicle sprite under each of its remap palettes
        remaps: bool,
    },
}

/// Decodes GBH style (.sty) files
#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    /// Input style file
    in_file: PathBuf,
    #[command(subcommand)]
    command: CliCommand
}

fn write_bitmap(path: &Path, bitmap: &Bitmap) -> Result<()> {
    let mut img = Image::new(bitmap.width as u32, bitmap.height as u32);
    for (x, y) in img.coordinates() {
        let c = bitmap.pixel(x as usize, y as usize);
        img.set_pixel(x, y, px!(c.r, c.g, c.b));
    }
    img.save(path).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

fn sprite_name(sprite_base: &SpriteBase, index: usize) -> String {
    match sprite_base.classify(index) {
        Some((category, n)) => format!("{}_{:04}", category, n),
        None => format!("sprite_{:04}", index),
    }
}

fn extract(out_dir: &Path, style: &Style, bitmaps: &StyleBitmaps, select: (bool, bool, bool)) -> Result<()> {
    std::fs::create_dir_all(out_dir).with_context(|| format!("cannot create {}", out_dir.display()))?;
    let (tiles, sprites, deltas) = select;

    if tiles {
        for (n, tile) in bitmaps.tiles.iter().enumerate() {
            write_bitmap(&out_dir.join(format!("tile_{:04}.bmp", n)), tile)?;
        }
        println!("wrote {} tiles", bitmaps.tiles.len());
    }
    if sprites {
        for (n, sprite) in bitmaps.sprites.iter().enumerate() {
            if sprite.width == 0 || sprite.height == 0 { continue; }
            write_bitmap(&out_dir.join(format!("{}.bmp", sprite_name(&style.sprite_base, n))), sprite)?;
        }
        println!("wrote {} sprites", bitmaps.sprites.len());
    }
    if deltas {
        let mut frame_counts: HashMap<usize, usize> = HashMap::new();
        for (delta, &source) in bitmaps.deltas.iter().zip(&bitmaps.delta_sources) {
            let frame_no = frame_counts.entry(source).or_insert(0);
            let fname = format!("delta_{}_{}.bmp", sprite_name(&style.sprite_base, source), frame_no);
            write_bitmap(&out_dir.join(fname), delta)?;
            *frame_no += 1;
        }
        println!("wrote {} delta frames", bitmaps.deltas.len());
    }
    Ok(())
}

fn extract_remaps(out_dir: &Path, style: &Style) -> Result<()> {
    for vehicle in &style.vehicles {
        let remaps = bitmap::reconstruct_vehicle_remaps(style, vehicle)?;
        for (n, remap) in remaps.iter().enumerate() {
            let fname = format!("car_model{:03}_remap{:02}.bmp", vehicle.model, n);
            write_bitmap(&out_dir.join(fname), remap)?;
        }
    }
    Ok(())
}

fn list(data: &[u8]) -> Result<()> {
    let (header, chunks) = chunk::list_chunks(data)?;
    println!("version {}", header.version);
    println!("offset     tag  length");
    for entry in &chunks {
        let known = if entry.header.kind().is_some() { "" } else { " (not decoded)" };
        println!("{:#010x} {} {:8}{}", entry.offset, entry.header.name(), entry.header.length, known);
    }
    Ok(())
}

fn print_allocation(name: &str, alloc: &Allocation) {
    println!("  {:20} {:5} .. {:5} ({})", name, alloc.offset, alloc.end(), alloc.count);
}

fn print_palette_base(base: &PaletteBase) {
    println!("palette base:");
    print_allocation("tile", &base.tile);
    print_allocation("sprite", &base.sprite);
    print_allocation("car remap", &base.car_remap);
    print_allocation("ped remap", &base.ped_remap);
    print_allocation("code object remap", &base.code_object_remap);
    print_allocation("map object remap", &base.map_object_remap);
    print_allocation("user remap", &base.user_remap);
    print_allocation("font remap", &base.font_remap);
}

fn info(style: &Style) -> Result<()> {
    println!("version {}", style.version);
    println!("{} physical palettes, {} tiles, {} sprites, {} delta sets",
        style.palettes.len(), style.tiles.len(), style.sprites.len(), style.deltas.len());
    print_palette_base(&style.palette_base);

    println!("sprite base:");
    for category in [ SpriteCategory::Car, SpriteCategory::Pedestrian, SpriteCategory::CodeObject,
                      SpriteCategory::MapObject, SpriteCategory::User, SpriteCategory::Font ] {
        print_allocation(&category.to_string(), &style.sprite_base.allocation(category));
    }

    for (n, font) in style.font_base.fonts.iter().enumerate() {
        print_allocation(&format!("font {}", n), font);
    }

    println!("vehicles:");
    for v in &style.vehicles {
        println!("  model {:3} sprite {:3} {}x{} passengers {} wreck {} rating {} remaps {:?} doors {}",
            v.model, v.sprite, v.width, v.height, v.passengers, v.wreck, v.rating, v.remaps, v.doors.len());
    }
    println!("map objects:");
    for o in &style.objects {
        println!("  model {:3} sprites {}", o.model, o.sprites);
    }
    println!("recyclable models: {:?}", style.recyclable);
    println!("surfaces:");
    for (kind, tiles) in style.surfaces.iter() {
        println!("  {:22} {:?}", kind.to_string(), tiles);
    }
    for d in &style.diagnostics {
        println!("warning: {}", d);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let data = std::fs::read(&args.in_file)
        .with_context(|| format!("cannot read {}", args.in_file.display()))?;

    match &args.command {
        CliCommand::List => {
            list(&data)
        },
        CliCommand::Info => {
            let style = Style::parse(&data)?;
            info(&style)
        },
        CliCommand::Extract{ out_dir, tiles, sprites, deltas, remaps } => {
            let style = Style::parse(&data)?;
            let bitmaps = bitmap::reconstruct(&style)?;
            let all = !(*tiles || *sprites || *deltas);
            extract(out_dir, &style, &bitmaps, (all || *tiles, all || *sprites, all || *deltas))?;
            if *remaps {
                extract_remaps(out_dir, &style)?;
            }
            Ok(())
        },
    }
}
