#![no_main]
use libfuzzer_sys::fuzz_target;

use datapack::{validate_document, DocumentType};
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<Value>(data) {
        for ty in DocumentType::LISTED {
            let result = validate_document(ty, &value);
            assert_eq!(result.valid, result.errors.is_empty());
        }
    }
});
