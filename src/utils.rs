use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Binary columns (product images, profile photos, tent licenses) cross the
/// JSON boundary base64-encoded.
pub fn encode_blob(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_blob(value: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_blob() {
        let bytes = vec![0u8, 1, 2, 254, 255];
        let encoded = encode_blob(&bytes);
        assert_eq!(decode_blob(&encoded).unwrap(), bytes);
    }

    #[test]
    fn decode_rejects_invalid_input() {
        assert!(decode_blob("not-base64!!!").is_err());
    }
}
