use rand::Rng;

/// Generate an opaque credential (32 random bytes = 64 hex characters).
/// Used for both session cookies and API tokens.
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Last four characters of a token, for display after issuance
pub fn token_hint(token: &str) -> String {
    let start = token
        .char_indices()
        .rev()
        .nth(3)
        .map(|(index, _)| index)
        .unwrap_or(0);
    token[start..].to_string()
}
