use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::styres::error::Result;
use crate::styres::reader::Reader;

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SurfaceKind {
    Grass = 0,
    RoadSpecial = 1,
    Water = 2,
    Electrified = 3,
    ElectrifiedPlatform = 4,
    WoodFloor = 5,
    MetalFloor = 6,
    MetalWall = 7,
    GrassWall = 8,
}

pub const SURFACE_KIND_COUNT: usize = 9;

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SurfaceKind::Grass => "grass",
            SurfaceKind::RoadSpecial => "road_special",
            SurfaceKind::Water => "water",
            SurfaceKind::Electrified => "electrified",
            SurfaceKind::ElectrifiedPlatform => "electrified_platform",
            SurfaceKind::WoodFloor => "wood_floor",
            SurfaceKind::MetalFloor => "metal_floor",
            SurfaceKind::MetalWall => "metal_wall",
            SurfaceKind::GrassWall => "grass_wall",
        };
        write!(f, "{}", name)
    }
}

/// Tile lists per surface behaviour.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Surfaces {
    lists: [ Vec<u16>; SURFACE_KIND_COUNT ],
}

impl Surfaces {
    pub fn tiles(&self, kind: SurfaceKind) -> &[u16] {
        &self.lists[u8::from(kind) as usize]
    }

    /// Every surface kind whose list contains `tile`.
    pub fn kinds_of(&self, tile: u16) -> Vec<SurfaceKind> {
        self.iter().filter(|(_, tiles)| tiles.contains(&tile)).map(|(kind, _)| kind).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SurfaceKind, &[u16])> + '_ {
        self.lists.iter().enumerate().filter_map(|(n, tiles)| {
            SurfaceKind::try_from(n as u8).ok().map(|kind| (kind, tiles.as_slice()))
        })
    }
}

/// Reads zero-terminated tile lists, one per surface kind in order, until
/// either the chunk or the kinds run out.
pub fn read_surfaces(rdr: &mut Reader) -> Result<Surfaces> {
    let mut surfaces = Surfaces::default();
    for list in surfaces.lists.iter_mut() {
        if rdr.is_exhausted() {
            break;
        }
        while !rdr.is_exhausted() {
            let tile = rdr.read::<u16>()?;
            if tile == 0 {
                break;
            }
            list.push(tile);
        }
    }
    Ok(surfaces)
}
