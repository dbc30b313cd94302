mod document;
mod settings;

pub use document::{load_document, ConfigDocument};
pub use settings::{
    SettingsBuilder, SettingsOverrides, SubmitSettings, DEFAULT_CONFIG_FILE, DEFAULT_ENDPOINT,
    DEFAULT_ORIGIN, DEFAULT_TOKEN, PRIME_TIMEOUT, SUBMIT_TIMEOUT,
};
