//! Build script for nimbus-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates clock.toml and generates the `ClockConfig` it describes

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use nimbus_core::config::ClockConfig;
use nimbus_core::input::parse_location;
use nimbus_core::time::TimeOfDay;
use nimbus_protocol::documents::truncated;

/// Longest accepted news source label
const SOURCE_LEN: usize = 12;

/// Keys accepted per section
const SCHEMA: &[(&str, &[&str])] = &[
    (
        "timing",
        &[
            "wake_interval_ms",
            "debounce_ms",
            "long_press_ms",
            "news_display_ms",
            "fetch_timeout_ms",
        ],
    ),
    ("refresh", &["time_ms", "weather_ms", "news_ms"]),
    ("alarm", &["time", "enabled", "snooze_s", "ring_limit_s"]),
    ("weather", &["location"]),
    ("news", &["source"]),
];

fn main() {
    setup_linker();
    let config = load_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read clock.toml and turn it into a validated configuration
fn load_config() -> ClockConfig {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: clock.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a clock.toml configuration file.          ║\n\
            ║  Please create one in the nimbus-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read clock.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let document: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in clock.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    check_schema(&document, &mut errors);
    let config = apply(&document, &mut errors);

    if errors.is_empty() {
        if let Err(e) = config.validate() {
            errors.push(format!("inconsistent settings: {:?}", e));
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in clock.toml                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=clock.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reject unknown sections and keys so typos don't silently fall back to
/// defaults
fn check_schema(document: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = document.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (section, value) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };
        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }
}

fn lookup<'a>(document: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    document.get(section).and_then(|s| s.get(key))
}

/// Positive integer setting
fn positive(
    document: &toml::Value,
    section: &str,
    key: &str,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match lookup(document, section, key)? {
        toml::Value::Integer(n) if (1..=max).contains(n) => Some(*n),
        toml::Value::Integer(_) => {
            errors.push(format!("[{}] {} must be 1-{}", section, key, max));
            None
        }
        _ => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

/// Parse an "HH:MM" alarm time
fn clock_time(text: &str) -> Option<TimeOfDay> {
    let (hour, minute) = text.split_once(':')?;
    if minute.len() != 2 {
        return None;
    }
    TimeOfDay::new(hour.parse().ok()?, minute.parse().ok()?)
}

/// Overlay the document onto the defaults
fn apply(document: &toml::Value, errors: &mut Vec<String>) -> ClockConfig {
    const MAX_MS: i64 = 24 * 60 * 60 * 1000;
    const MAX_S: i64 = 24 * 60 * 60;

    let mut config = ClockConfig::default();

    let millis: [(&str, &str, &mut u64); 8] = [
        ("timing", "wake_interval_ms", &mut config.wake_interval_ms),
        ("timing", "debounce_ms", &mut config.debounce_ms),
        ("timing", "long_press_ms", &mut config.long_press_ms),
        ("timing", "news_display_ms", &mut config.news_display_ms),
        ("timing", "fetch_timeout_ms", &mut config.fetch_timeout_ms),
        ("refresh", "time_ms", &mut config.time_refresh_ms),
        ("refresh", "weather_ms", &mut config.weather_refresh_ms),
        ("refresh", "news_ms", &mut config.news_refresh_ms),
    ];
    for (section, key, field) in millis {
        if let Some(n) = positive(document, section, key, MAX_MS, errors) {
            *field = n as u64;
        }
    }

    if let Some(n) = positive(document, "alarm", "snooze_s", MAX_S, errors) {
        config.snooze_secs = n as u32;
    }
    if let Some(n) = positive(document, "alarm", "ring_limit_s", MAX_S, errors) {
        config.ring_limit_secs = n as u32;
    }

    match lookup(document, "alarm", "time") {
        Some(toml::Value::String(text)) => match clock_time(text) {
            Some(time) => config.alarm_time = time,
            None => errors.push(format!("[alarm] time '{}' is not HH:MM", text)),
        },
        Some(_) => errors.push("[alarm] time must be a string".to_string()),
        None => {}
    }

    match lookup(document, "alarm", "enabled") {
        Some(toml::Value::Boolean(enabled)) => config.alarm_enabled = *enabled,
        Some(_) => errors.push("[alarm] enabled must be true or false".to_string()),
        None => {}
    }

    match lookup(document, "weather", "location") {
        Some(toml::Value::String(text)) => match parse_location(text) {
            Ok(location) => config.location = location,
            Err(e) => errors.push(format!("[weather] location '{}': {:?}", text, e)),
        },
        Some(_) => errors.push("[weather] location must be a string".to_string()),
        None => {}
    }

    match lookup(document, "news", "source") {
        Some(toml::Value::String(text))
            if !text.is_empty() && text.len() <= SOURCE_LEN && text.is_ascii() =>
        {
            config.news_source = truncated(text);
        }
        Some(_) => errors.push(format!(
            "[news] source must be 1-{} ASCII characters",
            SOURCE_LEN
        )),
        None => {}
    }

    config
}

/// Write `clock_config()` into OUT_DIR for the firmware to include
fn generate_config(config: &ClockConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let source = format!(
        "// Generated by build.rs from clock.toml\n\
        \n\
        /// Configuration compiled in from clock.toml\n\
        pub fn clock_config() -> ClockConfig {{\n\
        \x20   ClockConfig {{\n\
        \x20       wake_interval_ms: {},\n\
        \x20       debounce_ms: {},\n\
        \x20       long_press_ms: {},\n\
        \x20       news_display_ms: {},\n\
        \x20       time_refresh_ms: {},\n\
        \x20       news_refresh_ms: {},\n\
        \x20       weather_refresh_ms: {},\n\
        \x20       fetch_timeout_ms: {},\n\
        \x20       snooze_secs: {},\n\
        \x20       ring_limit_secs: {},\n\
        \x20       alarm_time: TimeOfDay::new({}, {}).unwrap_or(TimeOfDay::MIDNIGHT),\n\
        \x20       alarm_enabled: {},\n\
        \x20       location: truncated({:?}),\n\
        \x20       news_source: truncated({:?}),\n\
        \x20   }}\n\
        }}\n",
        config.wake_interval_ms,
        config.debounce_ms,
        config.long_press_ms,
        config.news_display_ms,
        config.time_refresh_ms,
        config.news_refresh_ms,
        config.weather_refresh_ms,
        config.fetch_timeout_ms,
        config.snooze_secs,
        config.ring_limit_secs,
        config.alarm_time.hour(),
        config.alarm_time.minute(),
        config.alarm_enabled,
        config.location.as_str(),
        config.news_source.as_str(),
    );

    fs::write(out_dir.join("clock_config.rs"), source).unwrap();
}
