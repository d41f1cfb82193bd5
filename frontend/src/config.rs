
#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development relay when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Same origin in production
}

/// Id of the element the app is mounted on.
pub const MOUNT_POINT_ID: &str = "app";

pub const SITE_URL: &str = "https://techryzen.github.io/pilot-training/";
pub const SITE_NAME: &str = "Skyward Aviation Academy";

const DEFAULT_MODEL: &str = "x-ai/grok-4-fast:free";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Everything the chat widget needs to reach the completion endpoint.
///
/// Values come from the build environment so that no credential lives in
/// the source tree. Without `CHAT_API_URL` the widget talks to the relay on
/// the backend origin, which is expected to attach the upstream key itself.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub site_url: String,
    pub site_name: String,
}

impl ChatSettings {
    pub fn from_build_env() -> Self {
        let endpoint = option_env!("CHAT_API_URL")
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}/api/chat/completions", get_backend_url()));
        let api_key = option_env!("CHAT_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(str::to_string);
        let model = option_env!("CHAT_MODEL").unwrap_or(DEFAULT_MODEL).to_string();

        Self {
            endpoint,
            api_key,
            model,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            site_url: SITE_URL.to_string(),
            site_name: SITE_NAME.to_string(),
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self::from_build_env()
    }
}
