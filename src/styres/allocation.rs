use crate::styres::error::{Error, Result};

/// Contiguous run of indices handed to one category of a partitioned index space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Allocation {
    pub offset: usize,
    pub count: usize,
}

impl Allocation {
    pub fn contains(&self, index: usize) -> bool {
        index >= self.offset && index < self.offset + self.count
    }

    /// Absolute index of the `relative`th entry of this allocation.
    pub fn index(&self, relative: usize, what: &'static str) -> Result<usize> {
        if relative >= self.count {
            return Err(Error::IndexOutOfRange{ what, index: relative, len: self.count });
        }
        Ok(self.offset + relative)
    }

    pub fn end(&self) -> usize {
        self.offset + self.count
    }
}

/// Turns per-category counts into back-to-back allocations, in the order given.
pub fn cumulative(counts: &[u16]) -> Vec<Allocation> {
    let mut offset = 0;
    counts.iter().map(|&count| {
        let alloc = Allocation{ offset, count: count as usize };
        offset += count as usize;
        alloc
    }).collect()
}
