//! Fuzz target for EDK2 firmware volume parsing
//!
//! Security concerns:
//! - Header lengths and variable area sizes that disagree with the input
//! - Record name and data sizes running past the end of the volume
//! - Malformed UTF-16 names
//! - Corrupted certdb payloads

#![no_main]

use libfuzzer_sys::fuzz_target;
use uefivars::edk2::{self, Edk2Options};

fuzz_target!(|data: &[u8]| {
    if let Ok(store) = edk2::decode(data) {
        let options = Edk2Options {
            length: data.len() as u64,
        };
        if let Ok(encoded) = edk2::encode(&store, &options) {
            let _ = edk2::decode(&encoded);
        }
    }
});
