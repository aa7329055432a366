//! Preset dictionary for the AWS payload compression.
//!
//! The dictionary primes the compressor with the shape of a typical payload:
//! length-prefixed names of the variables every firmware carries, their
//! vendor GUIDs and attribute words, the zero timestamp and digest
//! placeholders of authenticated variables, the X509 and SHA256 signature
//! type GUIDs and the most common signature owner GUID.
//!
//! These bytes are a locally built dictionary, not the one EC2 uses. Blobs
//! written here read back here, but a real EC2 UEFI data blob fails with
//! `DecompressionError` until this constant holds the upstream dictionary.

pub const AWS_DICTIONARY: &[u8] = b"\
    \x08\x00\x00\x00\x00\x00\x00\x00Boot0000\x04\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\x03+\x8c\x07\x00\
    \x00\x00\x08\x00\x00\x00\x00\x00\x00\x00Boot0001\x04\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\x03+\x8c\
    \x07\x00\x00\x00\x09\x00\x00\x00\x00\x00\x00\x00BootOrder\x04\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\
    \x03+\x8c\x07\x00\x00\x00\x0b\x00\x00\x00\x00\x00\x00\x00BootCurrent\x04\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\
    \x00\xe0\x98\x03+\x8c\x06\x00\x00\x00\x07\x00\x00\x00\x00\x00\x00\x00Timeout\
    \x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\
    \xaa\x0d\x00\xe0\x98\x03+\x8c\x07\x00\x00\x00\x04\x00\x00\x00\x00\x00\x00\x00\
    Lang\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\
    \x11\xaa\x0d\x00\xe0\x98\x03+\x8c\x07\x00\x00\x00\x0c\x00\x00\x00\x00\x00\x00\
    \x00PlatformLang\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\
    \xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\x03+\x8c\x07\x00\x00\x00\x11\x00\x00\x00\
    \x00\x00\x00\x00PlatformLangCodes\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\x03+\x8c\x06\x00\x00\x00\
    \x05\x00\x00\x00\x00\x00\x00\x00ConIn\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\x03+\x8c\x07\x00\x00\
    \x00\x06\x00\x00\x00\x00\x00\x00\x00ConOut\x04\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\x03+\x8c\x07\x00\
    \x00\x00\x06\x00\x00\x00\x00\x00\x00\x00ErrOut\x04\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\x03+\x8c\x07\
    \x00\x00\x00\x07\x00\x00\x00\x00\x00\x00\x00Key0000\x04\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\x03+\x8c\
    \x07\x00\x00\x00\x0a\x00\x00\x00\x00\x00\x00\x00SecureBoot\x04\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\
    \x03+\x8c\x06\x00\x00\x00\x09\x00\x00\x00\x00\x00\x00\x00SetupMode\x04\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\x00\
    \xe0\x98\x03+\x8c\x06\x00\x00\x00\x09\x00\x00\x00\x00\x00\x00\x00AuditMode\x04\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\
    \x0d\x00\xe0\x98\x03+\x8c\x06\x00\x00\x00\x0c\x00\x00\x00\x00\x00\x00\x00Dep\
    loyedMode\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\
    \xd2\x11\xaa\x0d\x00\xe0\x98\x03+\x8c\x06\x00\x00\x00\x0a\x00\x00\x00\x00\x00\
    \x00\x00VendorKeys\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\
    \xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\x03+\x8c\x06\x00\x00\x00\x10\x00\x00\x00\
    \x00\x00\x00\x00SignatureSupport\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\x03+\x8c\x06\x00\x00\x00\
    \x16\x00\x00\x00\x00\x00\x00\x00OsIndicationsSupported\x04\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\x11\xaa\x0d\x00\xe0\x98\x03\
    +\x8c\x06\x00\x00\x00\x03\x00\x00\x00\x00\x00\x00\x00MTC\x04\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x11@p\xeb\x02\x14\xd3\x11\x8ew\x00\xa0\xc9ir;\x07\
    \x00\x00\x00\x06\x00\x00\x00\x00\x00\x00\x00certdb\x04\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00n\xe5\xbe\xd9\xdcu\xd9I\xb4\xd7\xb54!\x0fcz\x07\x00\x00\x00\
    \x07\x00\x00\x00\x00\x00\x00\x00certdbv\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00n\xe5\xbe\xd9\xdcu\xd9I\xb4\xd7\xb54!\x0fcz'\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00 \x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x02\x00\x00\x00\x00\
    \x00\x00\x00PK\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\
    \x93\xd2\x11\xaa\x0d\x00\xe0\x98\x03+\x8c'\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00 \x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x03\x00\x00\x00\x00\x00\x00\x00\
    KEK\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00a\xdf\xe4\x8b\xca\x93\xd2\
    \x11\xaa\x0d\x00\xe0\x98\x03+\x8c'\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00 \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x02\x00\x00\x00\x00\x00\x00\x00db\x04\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\xcb\xb2\x19\xd7:=\x96E\xa3\xbc\xda\xd0\
    \x0egeo'\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00 \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x03\x00\x00\x00\x00\x00\x00\x00dbx\x04\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\xcb\xb2\x19\xd7:=\x96E\xa3\xbc\xda\xd0\x0egeo'\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00 \x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\xa1Y\xc0\xa5\
    \xe4\x94\xa7J\x87\xb5\xab\x15\x5c+\xf0r&\x16\xc4\xc1LP\x92@\xac\xa9A\xf96\x93\
    C(\xbd\x9a\xfawY\x032M\xbd`(\xf4\xe7\x8fxK";
