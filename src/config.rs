/// Process configuration, read once from the environment at startup and
/// handed to components at construction. Nothing reads the environment after
/// this point.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub ai: AiSettings,
}

#[derive(Debug, Clone)]
pub struct AiSettings {
    /// Feature flag for the /ai/chat bridge.
    pub enabled: bool,
    pub endpoint: Option<String>,
    pub deployment: Option<String>,
    pub api_version: String,
    pub api_key: Option<String>,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            deployment: None,
            api_version: "2024-10-21".to_string(),
            api_key: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://todos.db".to_string()),
            ai: AiSettings {
                enabled: env_flag("AI_CHAT_ENABLED"),
                endpoint: env_opt("OPENAI_ENDPOINT"),
                deployment: env_opt("OPENAI_CHAT_DEPLOYMENT"),
                api_version: std::env::var("OPENAI_API_VERSION")
                    .unwrap_or_else(|_| "2024-10-21".to_string()),
                api_key: env_opt("OPENAI_API_KEY"),
            },
        }
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_flag(name: &str) -> bool {
    matches!(
        std::env::var(name).unwrap_or_default().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
