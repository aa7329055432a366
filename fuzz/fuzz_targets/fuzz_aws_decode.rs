//! Fuzz target for the AWS container decoder
//!
//! The input is used both as the raw container and as base64 text.
//!
//! Security concerns:
//! - Record counts and length prefixes larger than the payload
//! - Memory exhaustion via decompression
//! - Truncated headers and zlib streams

#![no_main]

use libfuzzer_sys::fuzz_target;
use uefivars::aws;

fuzz_target!(|data: &[u8]| {
    if let Ok(store) = aws::decode_binary(data) {
        // Anything that decodes must encode and decode to the same store
        let encoded = aws::encode_binary(&store).expect("re-encode");
        assert_eq!(aws::decode_binary(&encoded).expect("re-decode"), store);
    }

    let _ = aws::decode(data);
});
