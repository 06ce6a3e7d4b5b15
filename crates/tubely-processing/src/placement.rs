//! Object placement: where inside a store an asset is written.

use tubely_core::OrientationClass;
use tubely_storage::StorageKey;

/// Object path for `key`. Videos are filed under their orientation bucket,
/// e.g. `landscape/{key}`; unclassified assets sit at the root.
pub fn place(orientation: Option<OrientationClass>, key: &StorageKey) -> String {
    match orientation {
        Some(class) => format!("{}/{}", class.bucket_name(), key),
        None => key.to_string(),
    }
}
