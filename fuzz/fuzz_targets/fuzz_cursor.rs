//! Fuzz target for the byte cursor
//!
//! Security concerns:
//! - Allocation driven by 64-bit length prefixes
//! - Reads past the end of the buffer

#![no_main]

use libfuzzer_sys::fuzz_target;
use uefivars::cursor::ByteCursor;

fuzz_target!(|data: &[u8]| {
    let mut cursor = ByteCursor::new(data);
    for _ in 0..16 {
        if cursor.read_data().is_err() {
            break;
        }
    }

    let mut cursor = ByteCursor::new(data);
    for _ in 0..8 {
        let _ = cursor.read_str();
        let _ = cursor.read_guid();
        let _ = cursor.read_u32();
        cursor.align(4);
    }
});
