//! Fuzz target for snapshot project parsing.
//!
//! Feeds arbitrary byte sequences through the project/dataset/annotation
//! deserialization path, checking for panics, buffer overflows, or other
//! undefined behavior.
//!
//! Run with:
//!   cargo +nightly fuzz run snapshot_parse

#![no_main]

use labelport::store::Project;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid OOM on very large inputs.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    // Errors are expected; only panics, crashes, or hangs matter.
    let _ = serde_json::from_slice::<Project>(data);
});
