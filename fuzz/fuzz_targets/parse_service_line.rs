#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    for name in homeserver::DEFAULT_SERVICES {
        let _ = homeserver::parse_service_line(data, name);
    }
});
