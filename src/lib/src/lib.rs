//! Conversion between UEFI variable store formats.
//!
//! Every format decodes into one [`VarStore`] and encodes from it, so any
//! input can be written as any output. Secure Boot keys can be enrolled on
//! the way through with [`driver::inject`].

#![forbid(unsafe_code)]

mod error;

/// Little-endian reader and writer over in-memory buffers.
pub mod cursor;

/// The format-independent variable model.
pub mod varstore;

/// `key=value` output options.
pub mod options;

/// The compressed, base64 armoured EC2 UEFI data container.
pub mod aws;

/// EDK2 firmware volume variable stores, including the certificate
/// database of authenticated variables.
pub mod edk2;

/// The JSON interchange document.
pub mod json;

/// Read-only ingestion of `/sys/firmware/efi/efivars`.
pub mod efivarfs;

/// Format selection and dispatch.
pub mod format;

/// Key enrollment and whole conversions.
pub mod driver;

pub use driver::{SecureBootKeys, convert, inject};
pub use error::*;
pub use format::{Format, Source, decode, encode};
pub use options::OutputOptions;
pub use varstore::{Guid, Timestamp, VarStore, Variable};

pub mod reexports {
    pub use {ct_codecs, log, thiserror};
}
