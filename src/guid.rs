use sha1::{Digest, Sha1};
use uuid::Uuid;

/// Maps `key` to a braced GUID string built from the first 128 bits of its SHA-1 digest.
///
/// The mapping has no inputs besides `key`, so regenerating a project on any
/// machine yields the same identifiers for the same folder paths and file names.
///
/// ```
/// assert_eq!(
///     vcxgen::guid::identifier_for("abc"),
///     "{a9993e36-4706-816a-ba3e-25717850c26c}"
/// );
/// ```
pub fn identifier_for(key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);

    Uuid::from_bytes(bytes).braced().to_string()
}
