#![no_main]
use libfuzzer_sys::fuzz_target;

use datapack::id;

fuzz_target!(|value: &str| {
    let storage = id::to_storage(value, "fuzz");
    let display = id::to_display(&storage, "fuzz");
    assert_eq!(id::to_display(&display, "fuzz"), display);
    assert_eq!(
        id::storage_key(&storage, "fuzz"),
        id::storage_key(value, "fuzz")
    );

    let existing = [storage.as_str()];
    let unique = id::make_unique(value, &existing, "fuzz");
    assert_ne!(
        id::storage_key(&unique, "fuzz"),
        id::storage_key(&storage, "fuzz")
    );
});
