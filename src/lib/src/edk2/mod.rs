//! EDK2 firmware volume variable store
//!
//! This is the NV variable flash image used by OVMF and AAVMF (`OVMF_VARS.fd`).
//!
//! # On-disk layout
//!
//! ```text
//! +--------------------------------------------+ offset 0x0000
//! |  EFI_FIRMWARE_VOLUME_HEADER  (72 bytes)    |
//! +--------------------------------------------+ offset 0x0048
//! |  VARIABLE_STORE_HEADER       (28 bytes)    |
//! +--------------------------------------------+ offset 0x0064
//! |  certdb record                             |
//! +--------------------------------------------+
//! |  Variable Record #1 (header + name + data) |
//! |  (padded to 4-byte alignment)              |
//! +--------------------------------------------+
//! |  ...                                       |
//! +--------------------------------------------+
//! |  Zero fill up to the volume length         |
//! +--------------------------------------------+
//! ```
//!
//! Records use the authenticated variable header. The certificate digests
//! of authenticated variables are not part of their records; they live in
//! the `certdb` variable and are re-attached on decode.

/// The certificate database variable.
pub mod certdb;

use crate::cursor::ByteCursor;
use crate::error::*;
use crate::options::{OutputOptions, required_value};
use crate::varstore::*;

use certdb::{CERTDB_NAME, CertDb, EFI_CERT_DB_GUID};
use log::*;

/// {fff12b8d-7696-4c8b-a985-2747075b4f50}
pub const EFI_SYSTEM_NV_DATA_FV_GUID: Guid = Guid::from_bytes([
    0x8d, 0x2b, 0xf1, 0xff, 0x96, 0x76, 0x8b, 0x4c, 0xa9, 0x85, 0x27, 0x47, 0x07, 0x5b, 0x4f, 0x50,
]);

/// {aaf32c78-947b-439a-a180-2e144ec37792}
pub const EFI_AUTHENTICATED_VARIABLE_GUID: Guid = Guid::from_bytes([
    0x78, 0x2c, 0xf3, 0xaa, 0x7b, 0x94, 0x9a, 0x43, 0xa1, 0x80, 0x2e, 0x14, 0x4e, 0xc3, 0x77, 0x92,
]);

/// "_FVH"
const FV_SIGNATURE: &[u8; 4] = b"_FVH";
const FV_REVISION: u8 = 0x02;

/// Firmware Volume header length, block map included.
pub const FV_HEADER_LENGTH: usize = 0x48;

/// Offset of the checksum field in the firmware volume header.
const FV_CHECKSUM_OFFSET: usize = 0x32;

/// 0x84 blocks of 4 KiB, then the terminating empty entry.
const FV_BLOCK_MAP: [u8; 16] = [
    0x84, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Format byte `formatted`, state byte `healthy`, then reserved space.
const VARSTORE_STATUS: [u8; 8] = [0x5a, 0xfe, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];

/// Variable record start marker
const VARIABLE_DATA: u16 = 0x55aa;

/// Variable record alignment
const HEADER_ALIGNMENT: usize = 4;

/// Variable is fully valid.
pub const VAR_ADDED: u8 = 0x3f;

/// Size of a standard OVMF_VARS.fd image (528 KiB).
pub const DEFAULT_LENGTH: u64 = 540_672;

/// Space reserved for the event log and fault tolerant write areas in the
/// second half of the volume.
const NON_VARIABLE_AREA: u64 = 8264;

// Firmware volume attribute bits
const EFI_FVB2_READ_DISABLED_CAP: u32 = 0x0000_0001;
const EFI_FVB2_READ_ENABLED_CAP: u32 = 0x0000_0002;
const EFI_FVB2_READ_STATUS: u32 = 0x0000_0004;
const EFI_FVB2_WRITE_DISABLED_CAP: u32 = 0x0000_0008;
const EFI_FVB2_WRITE_ENABLED_CAP: u32 = 0x0000_0010;
const EFI_FVB2_WRITE_STATUS: u32 = 0x0000_0020;
const EFI_FVB2_LOCK_CAP: u32 = 0x0000_0040;
const EFI_FVB2_LOCK_STATUS: u32 = 0x0000_0080;
const EFI_FVB2_STICKY_WRITE: u32 = 0x0000_0200;
const EFI_FVB2_MEMORY_MAPPED: u32 = 0x0000_0400;
const EFI_FVB2_ERASE_POLARITY: u32 = 0x0000_0800;
const EFI_FVB2_READ_LOCK_CAP: u32 = 0x0000_1000;
const EFI_FVB2_READ_LOCK_STATUS: u32 = 0x0000_2000;
const EFI_FVB2_WRITE_LOCK_CAP: u32 = 0x0000_4000;
const EFI_FVB2_WRITE_LOCK_STATUS: u32 = 0x0000_8000;
const EFI_FVB2_ALIGNMENT_16: u32 = 0x0004_0000;

/// Attributes written into new volumes.
pub const DEFAULT_FV_ATTRIBUTES: u32 = EFI_FVB2_READ_DISABLED_CAP
    | EFI_FVB2_READ_ENABLED_CAP
    | EFI_FVB2_READ_STATUS
    | EFI_FVB2_WRITE_DISABLED_CAP
    | EFI_FVB2_WRITE_ENABLED_CAP
    | EFI_FVB2_WRITE_STATUS
    | EFI_FVB2_LOCK_CAP
    | EFI_FVB2_LOCK_STATUS
    | EFI_FVB2_STICKY_WRITE
    | EFI_FVB2_MEMORY_MAPPED
    | EFI_FVB2_ERASE_POLARITY
    | EFI_FVB2_READ_LOCK_CAP
    | EFI_FVB2_READ_LOCK_STATUS
    | EFI_FVB2_WRITE_LOCK_CAP
    | EFI_FVB2_WRITE_LOCK_STATUS
    | EFI_FVB2_ALIGNMENT_16;

/// Settings for writing a firmware volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edk2Options {
    /// Total image length in bytes.
    pub length: u64,
}

impl Default for Edk2Options {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }
}

impl Edk2Options {
    /// Apply generic output options. Only `filesize=<KiB>` is understood.
    pub fn from_options(options: &OutputOptions) -> Result<Self, UVError> {
        let mut out = Self::default();
        for (key, value) in options.iter() {
            match key {
                "filesize" => {
                    let value = required_value(key, value)?;
                    let kib: u64 = value.parse().map_err(|_| UVError::InvalidOption {
                        key: key.to_string(),
                        reason: format!("\"{value}\" is not a size in KiB"),
                    })?;
                    out.length = kib.checked_mul(1024).ok_or_else(|| UVError::InvalidOption {
                        key: key.to_string(),
                        reason: format!("{kib} KiB is too large"),
                    })?;
                }
                _ => return Err(UVError::UnknownOption(key.to_string())),
            }
        }
        Ok(out)
    }

    /// Size of the variable area recorded in the variable store header.
    fn variable_area_size(&self) -> Result<u32, UVError> {
        (self.length / 2)
            .checked_sub(NON_VARIABLE_AREA)
            .and_then(|size| u32::try_from(size).ok())
            .ok_or_else(|| UVError::InvalidOption {
                key: "filesize".to_string(),
                reason: format!("a {} byte volume has no room for variables", self.length),
            })
    }
}

/// Sum of all little-endian 16-bit words, wrapping.
fn csum16(data: &[u8]) -> u16 {
    data.chunks(2).fold(0u16, |sum, word| {
        let lo = word[0] as u16;
        let hi = word.get(1).copied().unwrap_or(0) as u16;
        sum.wrapping_add(lo | (hi << 8))
    })
}

/// Decode a null-terminated UTF-16LE name.
pub(crate) fn decode_utf16_name(raw: &[u8]) -> Result<String, UVError> {
    if raw.len() % 2 != 0 {
        return Err(UVError::InvalidName);
    }
    let units: Vec<u16> = raw
        .chunks_exact(2)
        .map(|u| u16::from_le_bytes([u[0], u[1]]))
        .collect();
    let name = String::from_utf16(&units).map_err(|_| UVError::InvalidName)?;
    Ok(name.trim_end_matches('\0').to_string())
}

/// Encode a name as null-terminated UTF-16LE.
pub(crate) fn encode_utf16_name(name: &str) -> Vec<u8> {
    name.encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect()
}

fn invalid(what: impl Into<String>) -> UVError {
    UVError::InvalidVolume(what.into())
}

/// Decode a firmware volume image.
pub fn decode(data: &[u8]) -> Result<VarStore, UVError> {
    let mut file = ByteCursor::new(data);

    if file.read_bytes(16)?.iter().any(|&b| b != 0) {
        return Err(invalid("non-zero zero vector"));
    }
    let fsguid = file.read_guid()?;
    if fsguid != EFI_SYSTEM_NV_DATA_FV_GUID {
        return Err(invalid(format!("unexpected filesystem GUID {fsguid}")));
    }
    let length = file.read_u64()?;
    if length > data.len() as u64 {
        return Err(invalid(format!(
            "volume length {length} exceeds the {} byte image",
            data.len()
        )));
    }
    if file.read_bytes(4)? != FV_SIGNATURE {
        return Err(invalid("missing _FVH signature"));
    }
    let attrs = file.read_u32()?;
    let hlength = file.read_u16()?;
    if hlength as usize != FV_HEADER_LENGTH {
        return Err(invalid(format!("header length 0x{hlength:x}")));
    }
    let csum = file.read_u16()?;
    let header = data
        .get(..FV_HEADER_LENGTH)
        .ok_or_else(|| UVError::Truncated {
            offset: data.len(),
            wanted: (FV_HEADER_LENGTH - data.len()) as u64,
        })?;
    if csum16(header) != 0 {
        return Err(UVError::InvalidHeaderChecksum(csum));
    }
    file.read_bytes(3)?;
    let revision = file.read_u8()?;
    if revision != FV_REVISION {
        return Err(invalid(format!("revision 0x{revision:x}")));
    }
    file.read_bytes(FV_BLOCK_MAP.len())?;
    let vsguid = file.read_guid()?;
    if vsguid != EFI_AUTHENTICATED_VARIABLE_GUID {
        return Err(invalid(format!("unexpected variable store GUID {vsguid}")));
    }
    let varsize = file.read_u32()?;
    if file.read_bytes(VARSTORE_STATUS.len())? != VARSTORE_STATUS {
        return Err(invalid("variable store is not formatted and healthy"));
    }
    debug!("Volume length {length}, attributes 0x{attrs:08x}, variable area {varsize}");

    let mut store = VarStore::new();
    let mut certdb = CertDb::default();
    while file.remaining() >= 2 && file.read_u16()? == VARIABLE_DATA {
        let state = file.read_u8()?;
        file.read_u8()?;
        let attr = file.read_u32()?;
        let _monotonic_count = file.read_u64()?;
        let timestamp = file.read_timestamp()?;
        let _pubkey_index = file.read_u32()?;
        let name_size = file.read_u32()? as usize;
        let data_size = file.read_u32()? as usize;
        let guid = file.read_guid()?;
        let name = decode_utf16_name(file.read_bytes(name_size)?)?;
        let data = file.read_bytes(data_size)?.to_vec();
        file.align(HEADER_ALIGNMENT);

        if state != VAR_ADDED {
            debug!("Skipping {name} in state 0x{state:02x}");
            continue;
        }
        let mut var = Variable::new(name, guid, attr, data);
        if timestamp != EMPTY_TIMESTAMP {
            var.timestamp = Some(timestamp);
        }
        if var.is(CERTDB_NAME, &EFI_CERT_DB_GUID) {
            certdb = CertDb::deserialize(&var.data)?;
        } else {
            store.vars.push(var);
        }
    }

    let attached = certdb.attach_digests(&mut store.vars);
    debug!("Attached {attached} certdb digests");
    Ok(store)
}

fn write_var(raw: &mut ByteCursor<Vec<u8>>, var: &Variable, pubkey_index: u32) {
    let name = encode_utf16_name(&var.name);
    raw.write_u16(VARIABLE_DATA);
    raw.write_u8(VAR_ADDED);
    raw.write_u8(0);
    raw.write_u32(var.attr);
    raw.write_u64(0);
    raw.write_timestamp(var.timestamp.as_ref().unwrap_or(&EMPTY_TIMESTAMP));
    raw.write_u32(pubkey_index);
    raw.write_u32(name.len() as u32);
    raw.write_u32(var.data.len() as u32);
    raw.write_guid(&var.guid);
    raw.write_bytes(&name);
    raw.write_bytes(&var.data);
    raw.align_zeroed(HEADER_ALIGNMENT);
}

/// Encode a store as a firmware volume image.
pub fn encode(store: &VarStore, options: &Edk2Options) -> Result<Vec<u8>, UVError> {
    let length = options.length;
    let varsize = options.variable_area_size()?;

    let mut raw = ByteCursor::new(Vec::new());
    raw.write_bytes([0u8; 16]);
    raw.write_guid(&EFI_SYSTEM_NV_DATA_FV_GUID);
    raw.write_u64(length);
    raw.write_bytes(FV_SIGNATURE);
    raw.write_u32(DEFAULT_FV_ATTRIBUTES);
    raw.write_u16(FV_HEADER_LENGTH as u16);
    raw.write_u16(0);
    raw.write_bytes([0u8; 3]);
    raw.write_u8(FV_REVISION);
    raw.write_bytes(FV_BLOCK_MAP);
    raw.write_guid(&EFI_AUTHENTICATED_VARIABLE_GUID);
    raw.write_u32(varsize);
    raw.write_bytes(VARSTORE_STATUS);

    write_var(&mut raw, &CertDb::from_vars(&store.vars).to_var(), 0);

    let mut pubkey_index = 0u32;
    for var in &store.vars {
        match &var.digest {
            Some(digest) if !digest.is_empty() => {
                write_var(&mut raw, var, pubkey_index);
                pubkey_index += 1;
            }
            _ => write_var(&mut raw, var, 0),
        }
    }

    let needed = raw.position();
    if needed as u64 > length {
        return Err(UVError::NoSpace {
            needed,
            available: length,
        });
    }

    let mut image = raw.into_inner();
    image.resize(length as usize, 0);
    let csum = 0u16.wrapping_sub(csum16(&image[..FV_HEADER_LENGTH]));
    image[FV_CHECKSUM_OFFSET..FV_CHECKSUM_OFFSET + 2].copy_from_slice(&csum.to_le_bytes());
    Ok(image)
}
