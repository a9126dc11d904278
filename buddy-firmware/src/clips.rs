//! Clip table generated by the build script from `[catalog]` and sounds/

use buddy_drivers::audio::ClipEntry;

include!(concat!(env!("OUT_DIR"), "/clips.rs"));
