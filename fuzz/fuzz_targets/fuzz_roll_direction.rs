#![no_main]

use libfuzzer_sys::fuzz_target;
use linerqc_layout::RollDirection;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Whatever parses must print back to something that parses to itself.
    if let Ok(direction) = text.parse::<RollDirection>() {
        let printed = direction.to_string();
        let reparsed: RollDirection = printed.parse().expect("canonical form parses");
        assert_eq!(reparsed, direction);
    }
});
