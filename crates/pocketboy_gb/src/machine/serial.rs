use super::interrupts::{Interrupt, InterruptController};

/// Host callback receiving every transmitted byte.
pub type SerialSink = Box<dyn FnMut(u8) + Send>;

/// Serial port modelled via SB/SC with no link partner.
///
/// A transfer started with the internal clock (`SC = 0x81`) completes
/// immediately: SB is appended to `output`, forwarded to the `serial` log
/// target and the optional sink, then reads back 0xFF as if the line were
/// idle. Test ROMs use this to print their results.
#[derive(Default)]
pub struct Serial {
    sb: u8,
    sc: u8,
    output: Vec<u8>,
    /// Log each completed line at `info` in addition to per-byte `trace`.
    echo: bool,
    line: Vec<u8>,
    sink: Option<SerialSink>,
}

impl Serial {
    pub fn new(echo: bool) -> Self {
        Self {
            echo,
            ..Self::default()
        }
    }

    pub fn set_sink(&mut self, sink: SerialSink) {
        self.sink = Some(sink);
    }

    /// Every byte transmitted so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF01 => self.sb,
            0xFF02 => self.sc | 0x7E,
            _ => 0xFF,
        }
    }

    pub fn write(&mut self, addr: u16, value: u8, interrupts: &mut InterruptController) {
        match addr {
            0xFF01 => self.sb = value,
            0xFF02 => {
                self.sc = value;
                if value & 0x81 == 0x81 {
                    self.transmit(interrupts);
                }
            }
            _ => {}
        }
    }

    fn transmit(&mut self, interrupts: &mut InterruptController) {
        let byte = self.sb;
        self.output.push(byte);
        log::trace!(target: "serial", "{byte:#04X} {:?}", byte as char);

        if self.echo {
            if byte == b'\n' {
                log::info!(target: "serial", "{}", String::from_utf8_lossy(&self.line));
                self.line.clear();
            } else {
                self.line.push(byte);
            }
        }
        if let Some(sink) = self.sink.as_mut() {
            sink(byte);
        }

        self.sb = 0xFF;
        self.sc &= !0x80;
        interrupts.request(Interrupt::SERIAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn start_with_internal_clock_captures_sb() {
        let mut serial = Serial::new(false);
        let mut ic = InterruptController::new();
        serial.write(0xFF01, b'O', &mut ic);
        serial.write(0xFF02, 0x81, &mut ic);
        serial.write(0xFF01, b'K', &mut ic);
        serial.write(0xFF02, 0x81, &mut ic);

        assert_eq!(serial.output(), b"OK");
        assert!(ic.is_requested(Interrupt::SERIAL));
        assert_eq!(serial.read(0xFF02) & 0x80, 0);
        assert_eq!(serial.read(0xFF01), 0xFF);
    }

    #[test]
    fn external_clock_does_not_transmit() {
        let mut serial = Serial::new(false);
        let mut ic = InterruptController::new();
        serial.write(0xFF01, 0x42, &mut ic);
        serial.write(0xFF02, 0x80, &mut ic);
        assert!(serial.output().is_empty());
        assert!(!ic.is_requested(Interrupt::SERIAL));
        assert_eq!(serial.read(0xFF02), 0xFE);
    }

    #[test]
    fn sink_sees_every_byte() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut serial = Serial::new(true);
        let sink_seen = Arc::clone(&seen);
        serial.set_sink(Box::new(move |b| sink_seen.lock().unwrap().push(b)));

        let mut ic = InterruptController::new();
        for &b in b"hi\n" {
            serial.write(0xFF01, b, &mut ic);
            serial.write(0xFF02, 0x81, &mut ic);
        }
        assert_eq!(*seen.lock().unwrap(), b"hi\n".to_vec());
    }
}
