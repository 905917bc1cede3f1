#![no_main]

use libfuzzer_sys::fuzz_target;

use dimensional::{systems, ParseFlags};

fuzz_target!(|contents: &str| {
    let us = systems::us();
    if let Ok(q) = us.parse_with(contents, ParseFlags::ALLOW_UNKNOWN) {
        let _ = q.reduce();
        let _ = q.to_string();
    }
});
