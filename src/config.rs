use std::env;
use std::path::{Path, PathBuf};

pub const GEMINI_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const GEMINI_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const PERPLEXITY_TEXT_MODEL: &str = "sonar";

const TEXT_TEMPERATURE: f32 = 0.35;
const TEXT_TOP_P: f32 = 0.9;
const TEXT_TOP_K: i32 = 40;
const TEXT_MAX_OUTPUT_TOKENS: u32 = 40960;
const TEXT_TIMEOUT_SECS: u64 = 120;

const SEARCH_TEMPERATURE: f32 = 0.2;
const SEARCH_TOP_P: f32 = 0.9;
const SEARCH_MAX_TOKENS: u32 = 1400;

const MAX_IMAGES_PER_ENTITY: usize = 2;
const MAX_TOTAL_IMAGE_TASKS: usize = 3;
const IMAGE_TASK_DELAY_SECS: u64 = 5;

#[derive(Clone)]
pub struct GeminiSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            temperature: TEXT_TEMPERATURE,
            top_p: TEXT_TOP_P,
            top_k: TEXT_TOP_K,
            max_output_tokens: TEXT_MAX_OUTPUT_TOKENS,
            timeout_secs: TEXT_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone)]
pub struct SearchSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub search_context_size: &'static str,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            temperature: SEARCH_TEMPERATURE,
            top_p: SEARCH_TOP_P,
            max_tokens: SEARCH_MAX_TOKENS,
            search_context_size: "high",
        }
    }
}

#[derive(Clone)]
pub struct ImageSettings {
    pub max_images_per_entity: usize,
    pub max_total_tasks: usize,
    pub task_delay_secs: u64,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            max_images_per_entity: MAX_IMAGES_PER_ENTITY,
            max_total_tasks: MAX_TOTAL_IMAGE_TASKS,
            task_delay_secs: IMAGE_TASK_DELAY_SECS,
        }
    }
}

/// Root of the generated-image tree served at /static.
pub fn static_dir() -> PathBuf {
    match env::var("STATIC_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => PathBuf::from("static"),
    }
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}

/// Rewrite a filesystem path under the static root into its served URL.
/// Paths outside the root are returned as-is under /static.
pub fn static_url(path: &Path) -> String {
    let root = static_dir();
    let rel = path.strip_prefix(&root).unwrap_or(path);
    format!("/static/{}", rel.to_string_lossy().replace('\\', "/"))
}

/// Destination slug used for per-city image directories.
pub fn city_slug(city: &str) -> String {
    city.trim().to_lowercase().replace(' ', "-")
}
