#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic; a padded code is all digits with an optional sign.
        if let Some(code) = fapiao::core::pad_item_code(s) {
            let digits = code.strip_prefix('-').unwrap_or(&code);
            assert!(!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()));
        }
    }
});
