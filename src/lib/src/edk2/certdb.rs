//! The authenticated variable certificate database.
//!
//! EDK2 keeps the digest of the certificate that signed each time-based
//! authenticated variable in a separate variable, `certdb`. Its payload is
//!
//! ```text
//! u32  total size, including this field
//! repeated:
//!   guid  vendor GUID of the variable
//!   u32   node size in bytes
//!   u32   name length in UTF-16 units, terminator included
//!   u32   digest size
//!   ...   UTF-16LE name
//!   ...   digest
//! ```

use super::{decode_utf16_name, encode_utf16_name};
use crate::cursor::ByteCursor;
use crate::error::*;
use crate::varstore::*;

use log::*;

/// Name of the certificate database variable.
pub const CERTDB_NAME: &str = "certdb";

/// {d9bee56e-75dc-49d9-b4d7-b534210f637a}
pub const EFI_CERT_DB_GUID: Guid = Guid::from_bytes([
    0x6e, 0xe5, 0xbe, 0xd9, 0xdc, 0x75, 0xd9, 0x49, 0xb4, 0xd7, 0xb5, 0x34, 0x21, 0x0f, 0x63, 0x7a,
]);

/// Attributes of the certificate database variable.
pub const CERTDB_ATTR: u32 =
    EFI_VARIABLE_NON_VOLATILE | EFI_VARIABLE_BOOTSERVICE_ACCESS | EFI_VARIABLE_RUNTIME_ACCESS;

/// Size of the fixed part of an entry.
const CERT_NODE_HEADER_SIZE: usize = 16 + 4 + 4 + 4;

/// One certificate database entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertEntry {
    pub name: String,
    pub guid: Guid,
    pub digest: Vec<u8>,
}

/// The decoded certificate database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertDb {
    pub certs: Vec<CertEntry>,
}

impl CertDb {
    /// Parse the payload of a `certdb` variable.
    pub fn deserialize(data: &[u8]) -> Result<Self, UVError> {
        let mut file = ByteCursor::new(data);
        let size = file.read_u32()? as usize;
        if size != data.len() {
            return Err(UVError::InvalidCertDb(format!(
                "length field is {size}, variable holds {} bytes",
                data.len()
            )));
        }

        let mut remaining = size - 4;
        let mut certs = Vec::new();
        while remaining != 0 {
            let guid = file.read_guid()?;
            let _node_size = file.read_u32()?;
            let name_size = file.read_u32()? as usize * 2;
            let digest_size = file.read_u32()? as usize;
            let name = decode_utf16_name(file.read_bytes(name_size)?)?;
            let digest = file.read_bytes(digest_size)?.to_vec();

            let entry_size = CERT_NODE_HEADER_SIZE + name_size + digest_size;
            remaining = remaining.checked_sub(entry_size).ok_or_else(|| {
                UVError::InvalidCertDb(format!(
                    "entry for \"{name}\" overruns the database by {} bytes",
                    entry_size - remaining
                ))
            })?;
            certs.push(CertEntry { name, guid, digest });
        }
        Ok(CertDb { certs })
    }

    /// Serialize the database into the payload of a `certdb` variable.
    pub fn serialize(&self) -> Vec<u8> {
        let mut file = ByteCursor::new(Vec::new());
        file.write_u32(0);
        for cert in &self.certs {
            let name = encode_utf16_name(&cert.name);
            file.write_guid(&cert.guid);
            file.write_u32((CERT_NODE_HEADER_SIZE + name.len() + cert.digest.len()) as u32);
            file.write_u32((name.len() / 2) as u32);
            file.write_u32(cert.digest.len() as u32);
            file.write_bytes(&name);
            file.write_bytes(&cert.digest);
        }
        let size = file.position() as u32;
        file.seek(0);
        file.write_u32(size);
        file.into_inner()
    }

    /// Build the database from every variable carrying a digest, in store
    /// order. The position of a variable's entry is its public key index.
    pub fn from_vars(vars: &[Variable]) -> Self {
        let certs = vars
            .iter()
            .filter_map(|var| match &var.digest {
                Some(digest) if !digest.is_empty() => Some(CertEntry {
                    name: var.name.clone(),
                    guid: var.guid,
                    digest: digest.clone(),
                }),
                _ => None,
            })
            .collect();
        CertDb { certs }
    }

    /// The `certdb` variable holding this database.
    pub fn to_var(&self) -> Variable {
        Variable::new(CERTDB_NAME, EFI_CERT_DB_GUID, CERTDB_ATTR, self.serialize())
    }

    /// Copy each entry's digest into the variable with the same name and
    /// GUID.
    ///
    /// Returns the number of entries that found their variable. Entries
    /// whose (name, GUID) pair matches nothing are logged and dropped.
    pub fn attach_digests(&self, vars: &mut [Variable]) -> usize {
        let mut attached = 0;
        for cert in &self.certs {
            let mut found = false;
            for var in vars.iter_mut().filter(|v| v.is(&cert.name, &cert.guid)) {
                var.digest = Some(cert.digest.clone());
                found = true;
            }
            if found {
                attached += 1;
            } else if let Some(other) = vars.iter().find(|v| v.name == cert.name) {
                warn!(
                    "certdb entry for \"{}\" has GUID {} but the variable has {}; digest dropped",
                    cert.name, cert.guid, other.guid
                );
            } else {
                debug!("certdb entry for \"{}\" ({}) has no variable", cert.name, cert.guid);
            }
        }
        attached
    }
}
