#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let out = homeserver::internals::__normalize_systemctl_show_for_tests(data);
    for line in out.lines() {
        assert!(line.split_whitespace().count() >= 3);
    }
});
