//! Fuzz target for the certificate database parser
//!
//! Security concerns:
//! - Entry sizes that underflow the remaining byte counter
//! - Name lengths that overflow when converted to bytes
//! - Odd-length UTF-16 names

#![no_main]

use libfuzzer_sys::fuzz_target;
use uefivars::edk2::certdb::CertDb;

fuzz_target!(|data: &[u8]| {
    if let Ok(db) = CertDb::deserialize(data) {
        let _ = CertDb::deserialize(&db.serialize()).expect("re-parse");
    }
});
