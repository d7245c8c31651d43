//! Sign a 24 hour session token, then verify and decode it.
//!
//! Run with `RUST_LOG=cryypt_microjwt=trace cargo run --example microjwt`.

use cryypt_microjwt::{Algorithm, Codec, JwtResult};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> JwtResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let codec = Codec::new("adamngoodsecret", Algorithm::HS256)?;

    let data = json!({"username": "johndoe"});
    let expiration = 24 * 60 * 60;

    let token = codec.encode(&data, Some(expiration))?;
    println!("{token}");

    let decoded = codec.decode(&token)?;
    println!("headers: {}", serde_json::to_string(&decoded.headers)?);
    println!("payload: {}", serde_json::Value::Object(decoded.payload));

    println!("tampered verifies: {}", codec.verify(&format!("{token}x")));
    Ok(())
}
