mod read;
mod write;

use super::GameBoyBus;

impl GameBoyBus {
    /// Offset into the I/O scratch block for FF00–FF7F.
    #[inline]
    pub(super) fn io_offset(addr: u16) -> usize {
        (addr - 0xFF00) as usize
    }
}
