#![no_main]

use layerconf::Config;
use libfuzzer_sys::fuzz_target;

const FORMATS: [&str; 3] = ["yaml", "json", "toml"];

fuzz_target!(|data: &[u8]| {
    let Some((selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(content) = std::str::from_utf8(rest) else {
        return;
    };

    // Reading a layer and resolving every key it defines should never panic
    let mut config = Config::new(FORMATS[*selector as usize % FORMATS.len()]);
    if config.read_config([content.as_bytes()]).is_err() {
        return;
    }
    for key in config.all_keys() {
        let _ = config.get_string(&key);
        let _ = config.get_duration(&key);
        let _ = config.get_time(&key);
        let _ = config.get_int_slice(&key);
        let _ = config.get_string_map_string_slice(&key);
    }
});
