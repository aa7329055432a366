/// The uefivars error type.
#[derive(Debug, thiserror::Error)]
pub enum UVError {
    #[error("Internal error: [{0}]")]
    InternalError(String),

    #[error("I/O error")]
    IOError(#[from] std::io::Error),

    #[error("Unexpected end of input at 0x{offset:x} (wanted {wanted} bytes)")]
    Truncated { offset: usize, wanted: u64 },

    #[error("UTF-8 error")]
    UTF8Error(#[from] std::str::Utf8Error),

    #[error("Invalid UTF-16 variable name")]
    InvalidName,

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Invalid base64 data: {0}")]
    InvalidBase64(String),

    #[error("Invalid GUID: {0}")]
    InvalidGuid(String),

    #[error("Invalid magic. Expected AMZNUEFI. Found 0x{0:x}")]
    InvalidMagic(u64),

    #[error("Invalid checksum (stored 0x{stored:08x}, computed 0x{computed:08x}), please check you copied all data")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("Unsupported version {found} (this tool supports up to version {supported})")]
    UnsupportedVersion { found: u64, supported: u64 },

    #[error("Compression error: {0}")]
    CompressionError(String),

    #[error("Decompression error: {0}")]
    DecompressionError(String),

    #[error("Invalid firmware volume: {0}")]
    InvalidVolume(String),

    #[error("Invalid FV header checksum: 0x{0:04x}")]
    InvalidHeaderChecksum(u16),

    #[error("Invalid certdb: {0}")]
    InvalidCertDb(String),

    #[error("Can not fit variables into store ({needed} bytes needed, {available} available)")]
    NoSpace { needed: usize, available: u64 },

    #[error("Invalid efivarfs entry \"{0}\"")]
    InvalidEfivarfsEntry(String),

    #[error("Unknown format \"{0}\", choose from (\"aws\", \"edk2\", \"json\", \"efivarfs\", \"none\")")]
    UnknownFormat(String),

    #[error("The {0} format can not be written")]
    UnsupportedOutput(&'static str),

    #[error("The {0} format does not accept input of this kind")]
    UnsupportedInput(&'static str),

    #[error("The {0} format does not implement output options")]
    OptionsNotSupported(&'static str),

    #[error("Unknown option \"{0}\"")]
    UnknownOption(String),

    #[error("Invalid value for option \"{key}\": {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("Read empty variable \"{0}\". Aborting")]
    EmptyVariable(&'static str),

    #[error("Usage error: {0}")]
    UsageError(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UVError::InvalidMagic(0x1234);
        assert_eq!(err.to_string(), "Invalid magic. Expected AMZNUEFI. Found 0x1234");

        let err = UVError::InvalidHeaderChecksum(0xbeef);
        assert_eq!(err.to_string(), "Invalid FV header checksum: 0xbeef");

        let err = UVError::UnsupportedOutput("efivarfs");
        assert_eq!(err.to_string(), "The efivarfs format can not be written");

        let err = UVError::UnknownOption("compress".to_string());
        assert_eq!(err.to_string(), "Unknown option \"compress\"");

        let err = UVError::EmptyVariable("PK");
        assert_eq!(err.to_string(), "Read empty variable \"PK\". Aborting");
    }

    #[test]
    fn test_error_with_params() {
        let err = UVError::Truncated {
            offset: 0x10,
            wanted: 8,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected end of input at 0x10 (wanted 8 bytes)"
        );

        let err = UVError::UnsupportedVersion {
            found: 3,
            supported: 2,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported version 3 (this tool supports up to version 2)"
        );

        let err = UVError::NoSpace {
            needed: 600,
            available: 512,
        };
        assert!(err.to_string().starts_with("Can not fit variables into store"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: UVError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_utf8_error() {
        let invalid_utf8 = vec![0, 159, 146, 150];
        let utf8_err = std::str::from_utf8(&invalid_utf8).unwrap_err();
        let err: UVError = utf8_err.into();
        assert!(err.to_string().contains("UTF-8 error"));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: UVError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
