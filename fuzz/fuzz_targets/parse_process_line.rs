#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    for line in data.lines() {
        for pattern in homeserver::DEFAULT_PROCESSES {
            let _ = homeserver::parse_process_line(line, pattern, "ps aux");
        }
    }
});
