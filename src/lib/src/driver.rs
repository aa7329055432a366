//! Conversion between formats, with optional Secure Boot key enrollment.

use crate::error::*;
use crate::format::{self, Format, Source};
use crate::options::OutputOptions;
use crate::varstore::*;

use log::*;
use std::fs;
use std::path::Path;

/// Attributes of injected key variables.
pub const SECURE_BOOT_KEY_ATTR: u32 = EFI_VARIABLE_NON_VOLATILE
    | EFI_VARIABLE_BOOTSERVICE_ACCESS
    | EFI_VARIABLE_RUNTIME_ACCESS
    | EFI_VARIABLE_TIME_BASED_AUTHENTICATED_WRITE_ACCESS;

/// Secure Boot key databases to enroll, usually EFI signature lists
/// (`PK.esl`, `KEK.esl`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecureBootKeys {
    pub pk: Option<Vec<u8>>,
    pub kek: Option<Vec<u8>>,
    pub db: Option<Vec<u8>>,
    pub dbx: Option<Vec<u8>>,
}

impl SecureBootKeys {
    /// The key slots in enrollment order.
    fn slots(&self) -> [(&'static str, Guid, Option<&Vec<u8>>); 4] {
        [
            ("PK", EFI_GLOBAL_VARIABLE_GUID, self.pk.as_ref()),
            ("KEK", EFI_GLOBAL_VARIABLE_GUID, self.kek.as_ref()),
            ("db", EFI_IMAGE_SECURITY_DATABASE_GUID, self.db.as_ref()),
            ("dbx", EFI_IMAGE_SECURITY_DATABASE_GUID, self.dbx.as_ref()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.slots().iter().all(|(_, _, data)| data.is_none())
    }
}

/// Read a key file for the variable `name`. Empty files are rejected.
pub fn read_key_file(name: &'static str, path: impl AsRef<Path>) -> Result<Vec<u8>, UVError> {
    let data = fs::read(path)?;
    if data.is_empty() {
        return Err(UVError::EmptyVariable(name));
    }
    Ok(data)
}

/// Enroll the given keys, replacing existing variables in place.
///
/// Nothing is modified if any of the keys is empty.
pub fn inject(store: &mut VarStore, keys: &SecureBootKeys) -> Result<(), UVError> {
    let slots = keys.slots();
    for (name, _, data) in &slots {
        if data.is_some_and(|d| d.is_empty()) {
            return Err(UVError::EmptyVariable(*name));
        }
    }

    if keys.pk.is_none() && store.find("PK", &EFI_GLOBAL_VARIABLE_GUID).is_none() {
        warn!("No PK (PlatformKey) was set; SecureBoot will not be enabled without a PK");
    }

    for (name, guid, data) in slots {
        let Some(data) = data else { continue };
        let var = Variable::new(name, guid, SECURE_BOOT_KEY_ATTR, data.clone());
        if store.replace_or_append(var) {
            info!("Replacing {name}");
        } else {
            debug!("Adding {name}");
        }
    }
    Ok(())
}

/// Read a store, enroll keys and write it out in another format.
pub fn convert(
    input: Format,
    source: Source<'_>,
    output: Format,
    options: &OutputOptions,
    keys: &SecureBootKeys,
) -> Result<Vec<u8>, UVError> {
    let mut store = format::decode(input, source)?;
    info!("Read {} variables", store.len());

    inject(&mut store, keys)?;

    let encoded = format::encode(output, &store, options)?;
    info!("Written {} variables", store.len());
    Ok(encoded)
}
