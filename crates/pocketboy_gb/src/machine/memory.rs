/// Writable byte block. Offsets past the end read as open bus (0xFF) and
/// drop writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ram {
    data: Vec<u8>,
}

impl Ram {
    pub fn new(size: usize) -> Self {
        Self::filled(size, 0)
    }

    pub fn filled(size: usize, value: u8) -> Self {
        Self {
            data: vec![value; size],
        }
    }

    #[inline]
    pub fn read(&self, offset: usize) -> u8 {
        self.data.get(offset).copied().unwrap_or(0xFF)
    }

    #[inline]
    pub fn write(&mut self, offset: usize, value: u8) {
        if let Some(cell) = self.data.get_mut(offset) {
            *cell = value;
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Read-only byte block with the same out-of-range rule as [`Ram`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rom {
    data: Vec<u8>,
}

impl Rom {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    #[inline]
    pub fn read(&self, offset: usize) -> u8 {
        self.data.get(offset).copied().unwrap_or(0xFF)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
