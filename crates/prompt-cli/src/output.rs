use std::fmt::Write;

use prompt_engine::{AnswerStore, Prompt};
use serde::Serialize;

/// JSON document printed by `derive`.
#[derive(Serialize)]
pub struct DeriveOutput<'a> {
    pub prompts: &'a [Prompt],
    pub answers: &'a AnswerStore,
}

pub fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(&mut encoded, "{:02x}", byte);
    }
    encoded
}
