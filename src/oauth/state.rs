use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Random, URL-safe `state` value for one authorization round trip.
pub fn generate_state() -> String {
    let mut buf = [0u8; 24];
    rand::Rng::fill_bytes(&mut rand::rng(), &mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}
