pub const ALTERNATE_PATHS_FILENAME: &str = "alternate_paths.json";
pub const LINKS_FILENAME: &str = "links.json";
pub const RUN_STATS_FILENAME: &str = "run.stats.json";
pub const SETTINGS_FILENAME: &str = "rescue.settings.json";
