use std::env;

const DEFAULT_SOURCE_IMAGE: &str = "variant-8.jpg";
const DEFAULT_CROPPED_OUTPUT: &str = "cropped.png";
const DEFAULT_CROP_SIZE: i32 = 400;
const DEFAULT_SPRITE_IMAGE: &str = "fly64.png";
const DEFAULT_CAMERA_INDEX: i32 = 0;
const DEFAULT_THRESHOLD: f64 = 100.0;
const DEFAULT_QUIT_KEY: char = 'q';

/// Runtime settings for both exercises, resolved from `MARKTRACK_*`
/// environment variables with the lab's values as defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_image: String,
    pub cropped_output: String,
    pub crop_size: i32,
    pub sprite_image: String,
    pub camera_index: i32,
    pub threshold: f64,
    pub quit_key: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_image: DEFAULT_SOURCE_IMAGE.to_string(),
            cropped_output: DEFAULT_CROPPED_OUTPUT.to_string(),
            crop_size: DEFAULT_CROP_SIZE,
            sprite_image: DEFAULT_SPRITE_IMAGE.to_string(),
            camera_index: DEFAULT_CAMERA_INDEX,
            threshold: DEFAULT_THRESHOLD,
            quit_key: DEFAULT_QUIT_KEY,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            source_image: string_var("MARKTRACK_SOURCE_IMAGE", defaults.source_image),
            cropped_output: string_var("MARKTRACK_CROPPED_OUTPUT", defaults.cropped_output),
            crop_size: parsed_var("MARKTRACK_CROP_SIZE", defaults.crop_size),
            sprite_image: string_var("MARKTRACK_SPRITE_IMAGE", defaults.sprite_image),
            camera_index: parsed_var("MARKTRACK_CAMERA_INDEX", defaults.camera_index),
            threshold: parsed_var("MARKTRACK_THRESHOLD", defaults.threshold),
            quit_key: env::var("MARKTRACK_QUIT_KEY")
                .ok()
                .and_then(|v| v.chars().next())
                .unwrap_or(defaults.quit_key),
        }
    }
}

fn string_var(name: &str, default: String) -> String {
    env::var(name).unwrap_or(default)
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("ignoring unparseable {}={:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}
