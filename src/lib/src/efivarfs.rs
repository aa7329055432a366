//! Ingestion of a live efivarfs directory.
//!
//! Every file is named `<name>-<guid>` and holds a little-endian `u32`
//! attribute word followed by the variable data. The kernel does not expose
//! the timestamp or signing digest of time-based authenticated variables,
//! so those cannot be carried over and are skipped.

use crate::cursor::ByteCursor;
use crate::error::*;
use crate::varstore::*;

use log::*;
use std::fs;
use std::path::Path;

/// Where the kernel mounts efivarfs.
pub const DEFAULT_EFIVARFS_PATH: &str = "/sys/firmware/efi/efivars";

const GUID_TEXT_LEN: usize = 36;

/// Split `<name>-<guid>` into its variable name and GUID.
fn split_entry_name(file_name: &str) -> Result<(&str, Guid), UVError> {
    let invalid = || UVError::InvalidEfivarfsEntry(file_name.to_string());
    let at = file_name
        .len()
        .checked_sub(GUID_TEXT_LEN + 1)
        .filter(|&at| file_name.is_char_boundary(at))
        .ok_or_else(invalid)?;
    let (name, guid) = file_name.split_at(at);
    let guid = guid.strip_prefix('-').ok_or_else(invalid)?;
    let guid = guid.parse().map_err(|_| invalid())?;
    Ok((name, guid))
}

/// Decode the contents of a single efivarfs file.
pub fn decode_entry(file_name: &str, content: &[u8]) -> Result<Variable, UVError> {
    let (name, guid) = split_entry_name(file_name)?;
    let mut file = ByteCursor::new(content);
    let attr = file.read_u32()?;
    Ok(Variable::new(name, guid, attr, file.rest().to_vec()))
}

/// Read every variable below `path`, in file name order.
pub fn decode_dir(path: impl AsRef<Path>) -> Result<VarStore, UVError> {
    let path = path.as_ref();
    let mut entries = fs::read_dir(path)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut store = VarStore::new();
    for entry in entries {
        if !entry.file_type()?.is_file() {
            debug!("Ignoring {}", entry.path().display());
            continue;
        }
        let file_name = entry.file_name().into_string().map_err(|name| {
            UVError::InvalidEfivarfsEntry(name.to_string_lossy().into_owned())
        })?;
        let var = decode_entry(&file_name, &fs::read(entry.path())?)?;
        if var.is_time_authenticated() {
            warn!(
                "Skipping {}: time based authenticated variables can not be exported from efivarfs",
                var.name
            );
            continue;
        }
        debug!("Read {} ({} bytes)", var.name, var.data.len());
        store.vars.push(var);
    }
    info!("Read {} variables from {}", store.len(), path.display());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_var(dir: &Path, file_name: &str, attr: u32, data: &[u8]) {
        let mut content = attr.to_le_bytes().to_vec();
        content.extend_from_slice(data);
        fs::write(dir.join(file_name), content).unwrap();
    }

    #[test]
    fn test_split_entry_name() {
        let (name, guid) =
            split_entry_name("Boot0001-8be4df61-93ca-11d2-aa0d-00e098032b8c").unwrap();
        assert_eq!(name, "Boot0001");
        assert_eq!(guid, EFI_GLOBAL_VARIABLE_GUID);

        // Hyphens inside the variable name belong to the name.
        let (name, _) =
            split_entry_name("My-Var-d719b2cb-3d3a-4596-a3bc-dad00e67656f").unwrap();
        assert_eq!(name, "My-Var");

        for bad in [
            "Boot0001",
            "Boot0001-8be4df61-93ca-11d2-aa0d-00e098032b8",
            "Boot0001_8be4df61-93ca-11d2-aa0d-00e098032b8c",
            "Boot0001-8be4df61-93ca-11d2-aa0d-00e098032bxx",
        ] {
            assert!(matches!(
                split_entry_name(bad),
                Err(UVError::InvalidEfivarfsEntry(_))
            ));
        }
    }

    #[test]
    fn test_decode_entry() {
        let var = decode_entry(
            "Lang-8be4df61-93ca-11d2-aa0d-00e098032b8c",
            &[7, 0, 0, 0, b'e', b'n', b'g'],
        )
        .unwrap();
        assert_eq!(var.attr, 7);
        assert_eq!(var.data, b"eng");
        assert_eq!(var.timestamp, None);

        assert!(matches!(
            decode_entry("Lang-8be4df61-93ca-11d2-aa0d-00e098032b8c", &[7, 0]),
            Err(UVError::Truncated { .. })
        ));
    }

    #[test]
    fn test_decode_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_var(
            dir.path(),
            "Timeout-8be4df61-93ca-11d2-aa0d-00e098032b8c",
            0x7,
            &[5, 0],
        );
        write_var(
            dir.path(),
            "BootOrder-8be4df61-93ca-11d2-aa0d-00e098032b8c",
            0x7,
            &[1, 0],
        );
        write_var(
            dir.path(),
            "db-d719b2cb-3d3a-4596-a3bc-dad00e67656f",
            0x27,
            &[0xaa; 8],
        );

        let store = decode_dir(dir.path()).unwrap();
        let names: Vec<_> = store.vars.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["BootOrder", "Timeout"]);
        assert_eq!(store.vars[1].data, vec![5, 0]);
    }

    #[test]
    fn test_decode_dir_bad_name() {
        let dir = tempfile::tempdir().unwrap();
        write_var(dir.path(), "not-a-variable", 0x7, &[]);
        match decode_dir(dir.path()) {
            Err(UVError::InvalidEfivarfsEntry(name)) => assert_eq!(name, "not-a-variable"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_decode_dir_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            decode_dir(dir.path().join("absent")),
            Err(UVError::IOError(_))
        ));
    }
}
