//! A configured serial number source. The real D-Bus lookup of the
//! system serial number is an external concern out of scope here — this
//! implementation reads a value handed to it at construction time.

use acf_core::SerialNumberSource;

pub struct StaticSerialNumberSource(pub String);

impl SerialNumberSource for StaticSerialNumberSource {
    fn read_serial_number(&self) -> String {
        self.0.clone()
    }
}
