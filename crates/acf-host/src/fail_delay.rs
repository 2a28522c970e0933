//! Real-sleep fail-delay collaborator.

use acf_core::FailDelay;
use std::time::Duration;

#[derive(Default)]
pub struct ThreadSleepFailDelay;

impl FailDelay for ThreadSleepFailDelay {
    fn fail_delay(&self, micros: u32) {
        std::thread::sleep(Duration::from_micros(micros as u64));
    }
}
