#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Whatever parses must either produce a record or a MissingField error.
        if let Ok(invoice) = eracun::xml::from_ubl_xml(s) {
            let _ = eracun::hub3::build_hub3(&invoice);
        }
        let _ = eracun::hub3::truncate_hr(s, 30);
    }
});
