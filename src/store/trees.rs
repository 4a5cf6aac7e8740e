pub const WORDS: &str = "word_storage";
pub const PROGRESS: &str = "user_progress";
pub const CONFIG_VERSIONS: &str = "config_versions";
