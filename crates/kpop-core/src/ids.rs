//! Stable record identifiers.
//!
//! An id is the url-safe base64 encoding of a 9-byte BLAKE2b digest, so it is
//! always 12 characters from `[A-Za-z0-9_-]`. Ids depend only on the fields
//! that identify a person or a unit, which keeps them stable across
//! re-publishing as long as those fields do not change.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use blake2::digest::consts::U9;
use blake2::{Blake2b, Digest};

type Blake2b72 = Blake2b<U9>;

/// Hash an arbitrary key into an id.
#[must_use]
pub fn hash_id(key: &str) -> String {
    URL_SAFE.encode(Blake2b72::digest(key.as_bytes()))
}

/// Id of an idol: original-script legal name followed by birth date.
#[must_use]
pub fn idol_id(real_name_original: &str, birth_date: &str) -> String {
    hash_id(&format!("{real_name_original}{birth_date}"))
}

/// Id of a group: original-script display name.
#[must_use]
pub fn group_id(name_original: &str) -> String {
    hash_id(name_original)
}

/// Public profile page for a record, placed first in its `urls`.
#[must_use]
pub fn profile_url(site_base_url: &str, id: &str) -> String {
    format!("{}/?id={id}", site_base_url.trim_end_matches('/'))
}
