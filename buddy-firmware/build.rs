//! Build script for buddy-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates figure.toml at compile time
//! - Embeds the catalog clips from sounds/ and generates the clip table

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Catalog limits enforced by the firmware
const MIN_CLIPS: usize = 6;
const MAX_CLIPS: usize = 16;
const MAX_CLIP_NAME_LEN: usize = 40;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_clip_table(&config);
}

fn out_dir() -> PathBuf {
    PathBuf::from(env::var("OUT_DIR").unwrap())
}

/// Put memory.x on the linker search path and add the link scripts
fn setup_linker() {
    let out = out_dir();
    fs::write(out.join("memory.x"), include_bytes!("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Inner width of the error box
const BOX_WIDTH: usize = 64;

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    let rule = "═".repeat(BOX_WIDTH + 2);
    let mut out = format!("\n╔{rule}╗\n║  {:<w$}║\n╠{rule}╣\n", title, w = BOX_WIDTH);
    for line in lines.iter().flat_map(|l| l.lines()) {
        let line = if line.chars().count() > BOX_WIDTH {
            let cut: String = line.chars().take(BOX_WIDTH - 3).collect();
            format!("{cut}...")
        } else {
            line.to_string()
        };
        out.push_str(&format!("║  {:<w$}║\n", line, w = BOX_WIDTH));
    }
    out.push_str(&format!("╚{rule}╝\n"));
    panic!("{}", out);
}

/// Read, parse and validate figure.toml
fn validate_config() -> toml::Value {
    println!("cargo:rerun-if-changed=figure.toml");

    let path = Path::new("figure.toml");
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        fail(
            "ERROR: cannot read figure.toml",
            &[
                e.to_string(),
                String::new(),
                "The firmware embeds figure.toml from the buddy-firmware".into(),
                "directory; create it there and rebuild.".into(),
            ],
        )
    });

    let config: toml::Value = toml::from_str(&source)
        .unwrap_or_else(|e| fail("ERROR: invalid TOML syntax in figure.toml", &[e.to_string()]));

    let mut problems = Vec::new();
    validate_catalog(&config, &mut problems);
    validate_wave(&config, &mut problems);
    validate_lid(&config, &mut problems);
    validate_servos(&config, &mut problems);

    if !problems.is_empty() {
        let bullets: Vec<String> = problems.iter().map(|p| format!("• {}", p)).collect();
        fail("ERROR: invalid configuration in figure.toml", &bullets);
    }

    println!("cargo:warning=figure.toml validated successfully");
    config
}

/// Clip names from [catalog], empty if absent or malformed
fn clip_names(config: &toml::Value) -> Vec<String> {
    config
        .get("catalog")
        .and_then(|c| c.get("clips"))
        .and_then(|c| c.as_array())
        .map(|a| {
            a.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Validate the clip catalog
fn validate_catalog(config: &toml::Value, problems: &mut Vec<String>) {
    let clips = match config.get("catalog").and_then(|c| c.get("clips")) {
        Some(toml::Value::Array(clips)) => clips,
        Some(_) => {
            problems.push("[catalog] clips must be an array of strings".into());
            return;
        }
        None => {
            problems.push("Missing [catalog] clips - the clip list is required".into());
            return;
        }
    };

    if clips.len() < MIN_CLIPS || clips.len() > MAX_CLIPS {
        problems.push(format!(
            "[catalog] needs {}-{} clips, found {}",
            MIN_CLIPS,
            MAX_CLIPS,
            clips.len()
        ));
    }

    for (i, clip) in clips.iter().enumerate() {
        match clip.as_str() {
            Some(name) if name.is_empty() => {
                problems.push(format!("[catalog] clip {} is empty", i));
            }
            Some(name) if name.len() > MAX_CLIP_NAME_LEN => {
                problems.push(format!(
                    "[catalog] clip {} longer than {} bytes",
                    i, MAX_CLIP_NAME_LEN
                ));
            }
            Some(name) if name.contains(['/', '\\', '"']) => {
                problems.push(format!("[catalog] clip {} must be a plain file name", i));
            }
            Some(_) => {}
            None => problems.push(format!("[catalog] clip {} must be a string", i)),
        }
    }
}

/// Read an integer key as an angle, recording an error if out of range
fn angle(config: &toml::Value, section: &str, key: &str, problems: &mut Vec<String>) -> Option<i64> {
    let value = config.get(section)?.get(key)?;
    match value.as_integer() {
        Some(v) if (0..=255).contains(&v) => Some(v),
        _ => {
            problems.push(format!("[{}] {} must be an integer 0-255", section, key));
            None
        }
    }
}

/// Validate the wave profile ordering
fn validate_wave(config: &toml::Value, problems: &mut Vec<String>) {
    let start = angle(config, "wave", "start_angle", problems).unwrap_or(0);
    let mid = angle(config, "wave", "mid_angle", problems).unwrap_or(50);
    let end = angle(config, "wave", "end_angle", problems).unwrap_or(135);

    if !(start < mid && mid < end) {
        problems.push("[wave] needs start_angle < mid_angle < end_angle".into());
    }
    if angle(config, "wave", "step", problems) == Some(0) {
        problems.push("[wave] step must be at least 1".into());
    }
}

/// Validate the lid profile
fn validate_lid(config: &toml::Value, problems: &mut Vec<String>) {
    for key in ["open_angle", "rest_angle", "slow_after"] {
        angle(config, "lid", key, problems);
    }
}

/// Validate servo pulse calibration
fn validate_servos(config: &toml::Value, problems: &mut Vec<String>) {
    let servos = match config.get("servo") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    for (name, servo) in servos {
        if name != "wave" && name != "lid" {
            problems.push(format!("[servo.{}] unknown servo (expected wave or lid)", name));
            continue;
        }
        let min = servo.get("min_pulse_us").and_then(|v| v.as_integer());
        let max = servo.get("max_pulse_us").and_then(|v| v.as_integer());
        if let (Some(min), Some(max)) = (min, max) {
            if min >= max || max > 20_000 {
                problems.push(format!(
                    "[servo.{}] needs min_pulse_us < max_pulse_us <= 20000",
                    name
                ));
            }
        }
        if servo.get("actuation_range").and_then(|v| v.as_integer()) == Some(0) {
            problems.push(format!("[servo.{}] actuation_range must be at least 1", name));
        }
    }
}

/// Embed every catalog clip and write the clip table
fn generate_clip_table(config: &toml::Value) {
    println!("cargo:rerun-if-changed=sounds");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());

    let mut table = String::from("pub static CLIPS: &[ClipEntry<'static>] = &[\n");
    for name in clip_names(config) {
        let path = manifest_dir.join("sounds").join(&name);
        println!("cargo:rerun-if-changed={}", path.display());

        let data = if path.exists() {
            format!("include_bytes!({:?})", path.display().to_string())
        } else {
            println!("cargo:warning=sounds/{} not found, embedding empty clip", name);
            String::from("&[]")
        };
        table.push_str(&format!(
            "    ClipEntry {{ name: {:?}, data: {} }},\n",
            name, data
        ));
    }
    table.push_str("];\n");

    fs::write(out_dir().join("clips.rs"), table).unwrap();
}
