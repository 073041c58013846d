use crate::styres::chunk::ChunkKind;
use crate::styres::error::Result;
use crate::styres::reader::Reader;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectInfo {
    pub model: u8,
    /// Number of sprites stored for this model.
    pub sprites: u8,
}

pub fn read_objects(rdr: &mut Reader) -> Result<Vec<ObjectInfo>> {
    let count = ChunkKind::ObjectInfo.expect_multiple(rdr, 2)?;
    let mut objects = Vec::with_capacity(count);
    for _ in 0..count {
        let model = rdr.read::<u8>()?;
        let sprites = rdr.read::<u8>()?;
        objects.push(ObjectInfo{ model, sprites });
    }
    Ok(objects)
}
