/// The whole word collection lives under one key so a replace is a single insert.
pub const WORDS_JSON: &str = "words_json";

pub const PROGRESS_JSON: &str = "user_progress_json";

pub const SCHEMA_VERSION: &str = "_meta:version";
