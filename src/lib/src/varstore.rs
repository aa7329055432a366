//! The format-independent variable model every codec converges on.

use crate::error::*;

use std::fmt;
use std::str::FromStr;

/// Variable is persisted across resets.
pub const EFI_VARIABLE_NON_VOLATILE: u32 = 0x0000_0001;
/// Variable is visible before ExitBootServices().
pub const EFI_VARIABLE_BOOTSERVICE_ACCESS: u32 = 0x0000_0002;
/// Variable is visible to the operating system.
pub const EFI_VARIABLE_RUNTIME_ACCESS: u32 = 0x0000_0004;
/// Variable writes must be signed; such variables carry a timestamp and,
/// once enrolled, the digest of the signing certificate.
pub const EFI_VARIABLE_TIME_BASED_AUTHENTICATED_WRITE_ACCESS: u32 = 0x0000_0020;

/// An EFI_TIME value, kept as its raw 16 bytes.
pub type Timestamp = [u8; 16];

/// The on-disk encoding of an absent timestamp.
pub const EMPTY_TIMESTAMP: Timestamp = [0u8; 16];

/// A GUID in the mixed-endian byte layout used by the firmware.
///
/// The bytes are never reinterpreted; only the textual form swaps the first
/// three fields to big-endian as in `8be4df61-93ca-11d2-aa0d-00e098032b8c`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Guid([u8; 16]);

impl Guid {
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            u16::from_le_bytes([b[4], b[5]]),
            u16::from_le_bytes([b[6], b[7]]),
            b[8],
            b[9],
            b[10],
            b[11],
            b[12],
            b[13],
            b[14],
            b[15]
        )
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({self})")
    }
}

impl FromStr for Guid {
    type Err = UVError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UVError::InvalidGuid(s.to_string());
        let parts: Vec<&str> = s.split('-').collect();
        let lengths = [8, 4, 4, 4, 12];
        if parts.len() != lengths.len()
            || parts
                .iter()
                .zip(lengths)
                .any(|(p, len)| p.len() != len || !p.bytes().all(|c| c.is_ascii_hexdigit()))
        {
            return Err(invalid());
        }
        let data1 = u32::from_str_radix(parts[0], 16).map_err(|_| invalid())?;
        let data2 = u16::from_str_radix(parts[1], 16).map_err(|_| invalid())?;
        let data3 = u16::from_str_radix(parts[2], 16).map_err(|_| invalid())?;
        let tail = format!("{}{}", parts[3], parts[4]);

        let mut bytes = [0u8; 16];
        bytes[0..4].copy_from_slice(&data1.to_le_bytes());
        bytes[4..6].copy_from_slice(&data2.to_le_bytes());
        bytes[6..8].copy_from_slice(&data3.to_le_bytes());
        for (i, pair) in tail.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(pair).map_err(|_| invalid())?;
            bytes[8 + i] = u8::from_str_radix(pair, 16).map_err(|_| invalid())?;
        }
        Ok(Guid(bytes))
    }
}

/// {8be4df61-93ca-11d2-aa0d-00e098032b8c}, owner of PK and KEK.
pub const EFI_GLOBAL_VARIABLE_GUID: Guid = Guid([
    0x61, 0xdf, 0xe4, 0x8b, 0xca, 0x93, 0xd2, 0x11, 0xaa, 0x0d, 0x00, 0xe0, 0x98, 0x03, 0x2b, 0x8c,
]);

/// {d719b2cb-3d3a-4596-a3bc-dad00e67656f}, owner of db and dbx.
pub const EFI_IMAGE_SECURITY_DATABASE_GUID: Guid = Guid([
    0xcb, 0xb2, 0x19, 0xd7, 0x3a, 0x3d, 0x96, 0x45, 0xa3, 0xbc, 0xda, 0xd0, 0x0e, 0x67, 0x65, 0x6f,
]);

/// A single UEFI variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub guid: Guid,
    pub attr: u32,
    pub data: Vec<u8>,
    pub timestamp: Option<Timestamp>,
    pub digest: Option<Vec<u8>>,
}

impl Variable {
    /// Create a variable without authentication metadata.
    pub fn new(name: impl Into<String>, guid: Guid, attr: u32, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            guid,
            attr,
            data,
            timestamp: None,
            digest: None,
        }
    }

    /// Return `true` if writes to this variable are time-based authenticated.
    pub fn is_time_authenticated(&self) -> bool {
        self.attr & EFI_VARIABLE_TIME_BASED_AUTHENTICATED_WRITE_ACCESS != 0
    }

    /// Return `true` if this is the variable `name` in namespace `guid`.
    pub fn is(&self, name: &str, guid: &Guid) -> bool {
        self.name == name && self.guid == *guid
    }
}

/// An ordered collection of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarStore {
    pub vars: Vec<Variable>,
}

impl VarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Position of the first variable matching (`name`, `guid`).
    pub fn position(&self, name: &str, guid: &Guid) -> Option<usize> {
        self.vars.iter().position(|v| v.is(name, guid))
    }

    pub fn find(&self, name: &str, guid: &Guid) -> Option<&Variable> {
        self.vars.iter().find(|v| v.is(name, guid))
    }

    /// Replace the first variable with the same name and GUID, keeping its
    /// position, or append if there is none. Returns `true` on replacement.
    pub fn replace_or_append(&mut self, var: Variable) -> bool {
        match self.position(&var.name, &var.guid) {
            Some(idx) => {
                self.vars[idx] = var;
                true
            }
            None => {
                self.vars.push(var);
                false
            }
        }
    }
}

impl From<Vec<Variable>> for VarStore {
    fn from(vars: Vec<Variable>) -> Self {
        Self { vars }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guid_to_str() {
        assert_eq!(
            EFI_GLOBAL_VARIABLE_GUID.to_string(),
            "8be4df61-93ca-11d2-aa0d-00e098032b8c"
        );
        assert_eq!(
            EFI_IMAGE_SECURITY_DATABASE_GUID.to_string(),
            "d719b2cb-3d3a-4596-a3bc-dad00e67656f"
        );
    }

    #[test]
    fn guid_from_str() {
        assert_eq!(
            "8be4df61-93ca-11d2-aa0d-00e098032b8c".parse::<Guid>().unwrap(),
            EFI_GLOBAL_VARIABLE_GUID
        );
        assert_eq!(
            "D719B2CB-3D3A-4596-A3BC-DAD00E67656F".parse::<Guid>().unwrap(),
            EFI_IMAGE_SECURITY_DATABASE_GUID
        );
    }

    #[test]
    fn guid_from_str_err() {
        for bad in [
            "xbe4df61-93ca-11d2-aa0d-00e098032b8c",
            "018be4df61-93ca-11d2-aa0d-00e098032b8c",
            "8be4df61-93ca-11d2-aa0d",
            "8be4df61-93ca-11d2-aa0d-00e098032b8c-00",
            "8be4df61-+3ca-11d2-aa0d-00e098032b8c",
            "",
        ] {
            assert!(
                matches!(bad.parse::<Guid>(), Err(UVError::InvalidGuid(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_replace_or_append() {
        let mut store = VarStore::from(vec![
            Variable::new("A", EFI_GLOBAL_VARIABLE_GUID, 7, vec![1]),
            Variable::new("PK", EFI_GLOBAL_VARIABLE_GUID, 7, vec![2]),
            Variable::new("B", EFI_GLOBAL_VARIABLE_GUID, 7, vec![3]),
        ]);
        let replaced =
            store.replace_or_append(Variable::new("PK", EFI_GLOBAL_VARIABLE_GUID, 0x27, vec![9]));
        assert!(replaced);
        assert_eq!(store.position("PK", &EFI_GLOBAL_VARIABLE_GUID), Some(1));
        assert_eq!(store.vars[1].data, vec![9]);

        // Same name in another namespace is a different slot.
        let replaced = store.replace_or_append(Variable::new(
            "PK",
            EFI_IMAGE_SECURITY_DATABASE_GUID,
            7,
            vec![4],
        ));
        assert!(!replaced);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_time_authenticated() {
        let mut var = Variable::new("db", EFI_IMAGE_SECURITY_DATABASE_GUID, 0x7, vec![]);
        assert!(!var.is_time_authenticated());
        var.attr |= EFI_VARIABLE_TIME_BASED_AUTHENTICATED_WRITE_ACCESS;
        assert!(var.is_time_authenticated());
    }
}
