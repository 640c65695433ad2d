#![no_main]

use bulldoze_extensions::patch::HostVersion;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = HostVersion::from_bytes(data);
});
