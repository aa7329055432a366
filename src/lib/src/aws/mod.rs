//! The AWS variable store container.
//!
//! This is the format accepted by EC2 for pre-seeding instance UEFI data.
//! The binary layout is:
//!
//! ```text
//! u64  magic       "AMZNUEFI"
//! u32  crc32c      over everything that follows
//! u32  version     0
//! ...  zlib stream compressed with a preset dictionary
//! ```
//!
//! and the whole container is transported as base64 text.

/// The preset compression dictionary.
pub mod dictionary;

use crate::cursor::ByteCursor;
use crate::error::*;
use crate::varstore::*;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use log::*;

pub use dictionary::AWS_DICTIONARY;

/// "AMZNUEFI" read as a little-endian 64-bit integer.
pub const AWS_MAGIC: u64 = 0x4946_4555_4e5a_4d41;

/// The only container version defined so far.
pub const AWS_VERSION: u32 = 0;

/// The on-disk encoding of an absent digest.
pub const EMPTY_DIGEST: [u8; 32] = [0u8; 32];

/// Decode a base64 armoured AWS container.
pub fn decode(b64data: &[u8]) -> Result<VarStore, UVError> {
    let armoured: Vec<u8> = b64data
        .iter()
        .copied()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let raw = BASE64
        .decode(&armoured)
        .map_err(|e| UVError::InvalidBase64(e.to_string()))?;
    decode_binary(&raw)
}

/// Decode an AWS container that has already been stripped of its base64
/// armour.
pub fn decode_binary(raw: &[u8]) -> Result<VarStore, UVError> {
    let mut file = ByteCursor::new(raw);
    let magic = file.read_u64()?;
    if magic != AWS_MAGIC {
        return Err(UVError::InvalidMagic(magic));
    }
    let stored = file.read_u32()?;

    let checked_from = file.position();
    let computed = crc32c::crc32c(file.rest());
    if computed != stored {
        return Err(UVError::ChecksumMismatch { stored, computed });
    }
    file.seek(checked_from);

    let version = file.read_u32()?;
    if version != AWS_VERSION {
        return Err(UVError::UnsupportedVersion {
            found: version as u64,
            supported: AWS_VERSION as u64,
        });
    }

    let payload = inflate(file.rest())?;
    debug!("Decompressed {} bytes of variable data", payload.len());
    decode_payload(&payload)
}

fn decode_payload(payload: &[u8]) -> Result<VarStore, UVError> {
    let mut raw = ByteCursor::new(payload);
    let nr_entries = raw.read_u64()?;
    let mut store = VarStore::new();
    for _ in 0..nr_entries {
        let name = raw.read_str()?;
        let data = raw.read_data()?;
        let guid = raw.read_guid()?;
        let attr = raw.read_u32()?;
        let mut var = Variable::new(name, guid, attr, data);
        if var.is_time_authenticated() {
            let timestamp = raw.read_timestamp()?;
            if timestamp != EMPTY_TIMESTAMP {
                var.timestamp = Some(timestamp);
            }
            let digest = raw.read_data()?;
            if digest != EMPTY_DIGEST {
                var.digest = Some(digest);
            }
        }
        store.vars.push(var);
    }
    Ok(store)
}

/// Encode a store as a base64 armoured AWS container.
pub fn encode(store: &VarStore) -> Result<Vec<u8>, UVError> {
    Ok(BASE64.encode(encode_binary(store)?).into_bytes())
}

/// Encode a store as a binary AWS container, without base64 armour.
pub fn encode_binary(store: &VarStore) -> Result<Vec<u8>, UVError> {
    let zdata = deflate(&encode_payload(store))?;

    let mut checked = ByteCursor::new(Vec::with_capacity(zdata.len() + 4));
    checked.write_u32(AWS_VERSION);
    checked.write_bytes(&zdata);
    let checked = checked.into_inner();

    let mut file = ByteCursor::new(Vec::with_capacity(checked.len() + 12));
    file.write_u64(AWS_MAGIC);
    file.write_u32(crc32c::crc32c(&checked));
    file.write_bytes(&checked);
    Ok(file.into_inner())
}

fn encode_payload(store: &VarStore) -> Vec<u8> {
    let mut raw = ByteCursor::new(Vec::new());
    raw.write_u64(store.len() as u64);
    for var in &store.vars {
        raw.write_str(&var.name);
        raw.write_data(&var.data);
        raw.write_guid(&var.guid);
        raw.write_u32(var.attr);
        if var.is_time_authenticated() {
            raw.write_timestamp(var.timestamp.as_ref().unwrap_or(&EMPTY_TIMESTAMP));
            match &var.digest {
                Some(digest) => raw.write_data(digest),
                None => raw.write_data(EMPTY_DIGEST),
            }
        }
    }
    raw.into_inner()
}

fn deflate(input: &[u8]) -> Result<Vec<u8>, UVError> {
    let mut z = Compress::new(Compression::best(), true);
    z.set_dictionary(AWS_DICTIONARY)
        .map_err(|e| UVError::CompressionError(e.to_string()))?;
    let mut out = Vec::with_capacity(input.len() / 2 + 64);
    loop {
        if out.capacity() - out.len() < 1024 {
            out.reserve(out.capacity().max(4096));
        }
        let consumed = z.total_in() as usize;
        let status = z
            .compress_vec(&input[consumed..], &mut out, FlushCompress::Finish)
            .map_err(|e| UVError::CompressionError(e.to_string()))?;
        if status == Status::StreamEnd {
            return Ok(out);
        }
    }
}

fn inflate(input: &[u8]) -> Result<Vec<u8>, UVError> {
    let mut z = Decompress::new(true);
    let mut out = Vec::with_capacity(input.len() * 4 + 64);
    loop {
        if out.capacity() - out.len() < 1024 {
            out.reserve(out.capacity().max(4096));
        }
        let (total_in, total_out) = (z.total_in(), z.total_out());
        match z.decompress_vec(&input[total_in as usize..], &mut out, FlushDecompress::Finish) {
            Ok(Status::StreamEnd) => return Ok(out),
            Ok(_) => {
                if z.total_in() == total_in && z.total_out() == total_out {
                    return Err(UVError::DecompressionError(
                        "compressed stream ends prematurely".to_string(),
                    ));
                }
            }
            Err(e) => match e.needs_dictionary() {
                Some(_) => {
                    z.set_dictionary(AWS_DICTIONARY)
                        .map_err(|e| UVError::DecompressionError(e.to_string()))?;
                }
                None => return Err(UVError::DecompressionError(e.to_string())),
            },
        }
    }
}
