#![no_main]

// Arbitrary bytes must never panic the container reader, and anything it accepts must
// survive a write and re-parse unchanged.

use dst_texture_api::container::{parse_container, write_container};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(parsed) = parse_container(data) else {
        return;
    };

    let written =
        write_container(parsed.header.format, parsed.header.flags, &parsed.levels).unwrap();
    let reparsed = parse_container(&written).unwrap();
    assert_eq!(parsed, reparsed);
});
