#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Route parsing must never panic on arbitrary paths
    if let Ok(path) = std::str::from_utf8(data) {
        let _ = activator::core::route::Route::parse(path);
    }
});
