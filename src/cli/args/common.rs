//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per record (default)
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

impl OutputFormat {
    /// Parse a config preference value (`format: table` / `format: json`).
    pub fn from_preference(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Effective format: flag/env beats the config preference; unknown
    /// preference values fall back to the default.
    pub fn resolve(flag: Option<Self>, preference: Option<&str>) -> Self {
        flag.or_else(|| preference.and_then(Self::from_preference))
            .unwrap_or_default()
    }
}
