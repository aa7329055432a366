//! Conversions between formats, using JSON as the reference representation.

use uefivars::edk2::{self, Edk2Options};
use uefivars::varstore::*;
use uefivars::{Format, OutputOptions, SecureBootKeys, Source, UVError, aws, json};

const SAMPLE_JSON: &str = r#"{
    "version": 2,
    "variables": [
        {
            "name": "Boot0000",
            "data": "090100002c0055006900410070007000000004071400c9bdb87cebf8344faaea3ee4af6516a1040614007cd9ca7a0d6b5d4cb4d7d80c0d8f5d3a7fff0400",
            "guid": "8be4df61-93ca-11d2-aa0d-00e098032b8c",
            "attr": 7
        },
        {
            "name": "PK",
            "data": "a159c0a5e494a74a87b5ab155c2bf0720000000000000000",
            "guid": "8be4df61-93ca-11d2-aa0d-00e098032b8c",
            "attr": 39,
            "timestamp": "e5070b0f0a1e1e000000000000000000"
        },
        {
            "name": "db",
            "data": "a159c0a5e494a74a87b5ab155c2bf072",
            "guid": "d719b2cb-3d3a-4596-a3bc-dad00e67656f",
            "attr": 39,
            "timestamp": "e5070b0f0a1e1e000000000000000000",
            "digest": "b74b1fa8a4a5d2e2b4b0c0d3b3b45b6bc9d0a3b8b6a1e1f1a0b0c0d0e0f01020"
        },
        {
            "name": "MTC",
            "data": "01000000",
            "guid": "eb704011-1402-11d3-8e77-00a0c969723b",
            "attr": 7
        }
    ]
}
"#;

fn sample() -> VarStore {
    json::decode(SAMPLE_JSON.as_bytes()).unwrap()
}

fn via(format: Format, store: &VarStore) -> VarStore {
    let encoded = uefivars::encode(format, store, &OutputOptions::new()).unwrap();
    uefivars::decode(format, Source::Bytes(&encoded)).unwrap()
}

#[test]
fn json_is_byte_exact() {
    let encoded = json::encode(&sample()).unwrap();
    assert_eq!(String::from_utf8(encoded).unwrap(), SAMPLE_JSON);
}

#[test]
fn json_edk2_json() {
    let store = sample();
    let back = via(Format::Edk2, &store);
    assert_eq!(back, store);
    assert_eq!(json::encode(&back).unwrap(), SAMPLE_JSON.as_bytes());
}

#[test]
fn json_aws_json() {
    let store = sample();
    let back = via(Format::Aws, &store);
    assert_eq!(back, store);
    assert_eq!(json::encode(&back).unwrap(), SAMPLE_JSON.as_bytes());
}

#[test]
fn aws_edk2_aws() {
    let store = sample();
    let aws = aws::encode(&store).unwrap();
    let from_aws = aws::decode(&aws).unwrap();
    let image = edk2::encode(&from_aws, &Edk2Options::default()).unwrap();
    let from_edk2 = edk2::decode(&image).unwrap();
    assert_eq!(aws::decode(&aws::encode(&from_edk2).unwrap()).unwrap(), store);
}

#[test]
fn pk_and_db_keep_digest_through_edk2() {
    let mut pk = Variable::new(
        "PK",
        "8be4df61-93ca-11d2-aa0d-00e098032b8c".parse().unwrap(),
        0x27,
        b"PK signature list".to_vec(),
    );
    pk.timestamp = Some([0; 16]);
    let mut db = Variable::new(
        "db",
        "d719b2cb-3d3a-4596-a3bc-dad00e67656f".parse().unwrap(),
        0x27,
        b"db signature list".to_vec(),
    );
    db.digest = Some((0u8..32).collect());
    let store = VarStore::from(vec![pk, db]);

    let once = edk2::decode(&edk2::encode(&store, &Edk2Options::default()).unwrap()).unwrap();
    let twice = edk2::decode(&edk2::encode(&once, &Edk2Options::default()).unwrap()).unwrap();

    assert_eq!(twice.len(), 2);
    for (a, b) in store.vars.iter().zip(&twice.vars) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.guid, b.guid);
        assert_eq!(a.data, b.data);
        assert_eq!(a.digest, b.digest);
    }
    // The zero timestamp is the encoding of "no timestamp".
    assert_eq!(twice.vars[0].timestamp, None);
}

#[test]
fn enroll_keys_into_edk2_image() {
    let image = edk2::encode(&sample(), &Edk2Options::default()).unwrap();
    let keys = SecureBootKeys {
        pk: Some(b"new PK".to_vec()),
        kek: Some(b"new KEK".to_vec()),
        ..Default::default()
    };
    let options = OutputOptions::parse("filesize=768");
    let out = uefivars::convert(
        Format::Edk2,
        Source::Bytes(&image),
        Format::Edk2,
        &options,
        &keys,
    )
    .unwrap();
    assert_eq!(out.len(), 768 * 1024);

    let store = edk2::decode(&out).unwrap();
    let names: Vec<_> = store.vars.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Boot0000", "PK", "db", "MTC", "KEK"]);
    assert_eq!(store.vars[1].data, b"new PK");
    assert_eq!(store.vars[1].timestamp, None);
    // db was left alone and keeps its digest.
    assert_eq!(store.vars[2].digest, sample().vars[2].digest);
}

#[test]
fn store_too_large_for_volume() {
    let store = VarStore::from(vec![Variable::new(
        "Big",
        EFI_GLOBAL_VARIABLE_GUID,
        0x7,
        vec![0x5a; 64 * 1024],
    )]);
    let options = OutputOptions::parse("filesize=32");
    assert!(matches!(
        uefivars::encode(Format::Edk2, &store, &options),
        Err(UVError::NoSpace { .. })
    ));
}

#[test]
fn efivarfs_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let write = |file: &str, attr: u32, data: &[u8]| {
        let mut content = attr.to_le_bytes().to_vec();
        content.extend_from_slice(data);
        std::fs::write(dir.path().join(file), content).unwrap();
    };
    write("BootOrder-8be4df61-93ca-11d2-aa0d-00e098032b8c", 0x7, &[0, 0]);
    write("PK-8be4df61-93ca-11d2-aa0d-00e098032b8c", 0x27, b"pk");

    let out = uefivars::convert(
        Format::Efivarfs,
        Source::Directory(dir.path()),
        Format::Json,
        &OutputOptions::new(),
        &SecureBootKeys::default(),
    )
    .unwrap();
    let store = json::decode(&out).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.vars[0].name, "BootOrder");

    assert!(matches!(
        uefivars::encode(Format::Efivarfs, &store, &OutputOptions::new()),
        Err(UVError::UnsupportedOutput("efivarfs"))
    ));
}
