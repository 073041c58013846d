use packed_struct::prelude::*;

use crate::styres::error::{Error, Result};
use crate::styres::reader::Reader;

pub const RECYCLE_LIMIT: usize = 64;
const RECYCLE_END: u8 = 255;

const VEHICLE_HEADER_SIZE: usize = 14;

#[derive(PackedStruct)]
#[packed_struct(endian="lsb")]
pub struct VehicleHeader {
    pub model: u8,
    pub sprite: u8,
    pub width: u8,
    pub height: u8,
    pub num_remaps: u8,
    pub passengers: u8,
    pub wreck: u8,
    pub rating: u8,
    pub front_wheel_offset: u8,
    pub rear_wheel_offset: u8,
    pub front_window_offset: u8,
    pub rear_window_offset: u8,
    pub info_flags: u8,
    pub info_flags2: u8,
}

/// Door position relative to the vehicle centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Door {
    pub x: i8,
    pub y: i8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VehicleInfo {
    pub model: u8,
    /// Sprite number relative to the start of the car sprites.
    pub sprite: u8,
    pub width: u8,
    pub height: u8,
    pub passengers: u8,
    /// Wreck graphic, or 99 when the vehicle cannot be wrecked.
    pub wreck: u8,
    pub rating: u8,
    pub front_wheel_offset: i8,
    pub rear_wheel_offset: i8,
    pub front_window_offset: i8,
    pub rear_window_offset: i8,
    pub info_flags: u8,
    pub info_flags2: u8,
    /// Virtual palettes relative to the car remap allocation.
    pub remaps: Vec<u8>,
    pub doors: Vec<Door>,
}

impl VehicleInfo {
    pub fn read(rdr: &mut Reader) -> Result<VehicleInfo> {
        let h = VehicleHeader::unpack_from_slice(rdr.read_bytes(VEHICLE_HEADER_SIZE)?)
            .map_err(|e| Error::Layout{ what: "vehicle header", message: format!("{:?}", e) })?;
        let remaps = rdr.read_many::<u8>(h.num_remaps as usize)?;
        let num_doors = rdr.read::<u8>()? as usize;
        let doors = rdr.read_many::<i8>(num_doors * 2)?
            .chunks_exact(2)
            .map(|d| Door{ x: d[0], y: d[1] })
            .collect();
        Ok(VehicleInfo{
            model: h.model,
            sprite: h.sprite,
            width: h.width,
            height: h.height,
            passengers: h.passengers,
            wreck: h.wreck,
            rating: h.rating,
            front_wheel_offset: h.front_wheel_offset as i8,
            rear_wheel_offset: h.rear_wheel_offset as i8,
            front_window_offset: h.front_window_offset as i8,
            rear_window_offset: h.rear_window_offset as i8,
            info_flags: h.info_flags,
            info_flags2: h.info_flags2,
            remaps,
            doors,
        })
    }
}

pub fn read_vehicles(rdr: &mut Reader, out: &mut Vec<VehicleInfo>) -> Result<()> {
    while !rdr.is_exhausted() {
        out.push(VehicleInfo::read(rdr)?);
    }
    Ok(())
}

/// Reads the recyclable model list: at most `RECYCLE_LIMIT` bytes, ended
/// early by 255. Whatever follows is skipped.
pub fn read_recyclable(rdr: &mut Reader) -> Result<Vec<u8>> {
    let mut models = Vec::new();
    for _ in 0..rdr.len().min(RECYCLE_LIMIT) {
        let model = rdr.read::<u8>()?;
        if model == RECYCLE_END {
            break;
        }
        models.push(model);
    }
    if rdr.len() > RECYCLE_LIMIT {
        log::warn!("RECY: {} bytes exceeds the {} entry limit", rdr.len(), RECYCLE_LIMIT);
    }
    rdr.skip(rdr.remaining())?;
    Ok(models)
}
