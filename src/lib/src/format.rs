//! Format selection and dispatch to the per-format codecs.

use crate::edk2::Edk2Options;
use crate::error::*;
use crate::options::OutputOptions;
use crate::varstore::VarStore;
use crate::{aws, edk2, efivarfs, json};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A variable store representation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    /// Base64 armoured, compressed EC2 UEFI data.
    Aws,
    /// An EDK2 OVMF variable store firmware volume.
    Edk2,
    /// The JSON interchange document.
    Json,
    /// A live efivarfs directory. Input only.
    Efivarfs,
    /// An empty store. Input only.
    None,
}

impl Format {
    pub const ALL: [Format; 5] = [
        Format::Aws,
        Format::Edk2,
        Format::Json,
        Format::Efivarfs,
        Format::None,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Format::Aws => "aws",
            Format::Edk2 => "edk2",
            Format::Json => "json",
            Format::Efivarfs => "efivarfs",
            Format::None => "none",
        }
    }

    /// Return `true` if the format reads from a directory rather than a
    /// byte stream.
    pub fn reads_directory(self) -> bool {
        self == Format::Efivarfs
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = UVError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| UVError::UnknownFormat(s.to_string()))
    }
}

/// Where a store is read from.
#[derive(Debug, Copy, Clone)]
pub enum Source<'a> {
    Bytes(&'a [u8]),
    Directory(&'a Path),
}

/// Decode a store in the given format.
pub fn decode(format: Format, source: Source<'_>) -> Result<VarStore, UVError> {
    match (format, source) {
        (Format::Aws, Source::Bytes(data)) => aws::decode(data),
        (Format::Edk2, Source::Bytes(data)) => edk2::decode(data),
        (Format::Json, Source::Bytes(data)) => json::decode(data),
        (Format::Efivarfs, Source::Directory(path)) => efivarfs::decode_dir(path),
        (Format::None, _) => Ok(VarStore::new()),
        (format, _) => Err(UVError::UnsupportedInput(format.name())),
    }
}

/// Encode a store in the given format, applying the output options.
pub fn encode(
    format: Format,
    store: &VarStore,
    options: &OutputOptions,
) -> Result<Vec<u8>, UVError> {
    match format {
        Format::Aws => {
            options.expect_none(format.name())?;
            aws::encode(store)
        }
        Format::Edk2 => edk2::encode(store, &Edk2Options::from_options(options)?),
        Format::Json => {
            options.expect_none(format.name())?;
            json::encode(store)
        }
        Format::Efivarfs | Format::None => Err(UVError::UnsupportedOutput(format.name())),
    }
}
