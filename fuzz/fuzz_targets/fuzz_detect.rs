#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are fine, panics are bugs.
    let _ = eracun::xml::parse_invoice_bytes(data);
});
