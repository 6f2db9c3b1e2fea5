use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize data as compact JSON
///
/// # Errors
///
/// Returns an error if:
/// - Serialization fails
pub fn serialize<T: Serialize>(data: &T) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(data)
}

/// Deserialize JSON bytes into `T`
///
/// # Errors
///
/// Returns an error if:
/// - Data is not valid JSON
/// - Data does not match the shape of `T`
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    serde_json::from_slice(bytes)
}
