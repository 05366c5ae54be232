use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::motion::easing::EasingType;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub waitlist: WaitlistConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Animation parameters shared by every reveal, carousel and parallax call site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Skills carousel autoscroll speed in pixels per millisecond
    #[serde(default = "default_autoscroll_rate")]
    pub autoscroll_px_per_ms: f64,
    /// Duration of section fade-in transitions
    #[serde(default = "default_reveal_duration")]
    pub reveal_duration_ms: u64,
    /// Easing used by section fade-ins
    #[serde(default = "default_reveal_easing")]
    pub reveal_easing: EasingType,
    /// Fraction of a section that must be on screen before it reveals
    #[serde(default = "default_section_threshold")]
    pub section_threshold: f64,
    /// Stagger between project cards
    #[serde(default = "default_card_stagger")]
    pub card_stagger_ms: u64,
    /// Stagger between skill badges
    #[serde(default = "default_skill_stagger")]
    pub skill_stagger_ms: u64,
    /// Stagger between letters of animated titles
    #[serde(default = "default_letter_stagger")]
    pub letter_stagger_ms: u64,
    /// Loading screen shown before the home page reveals
    #[serde(default = "default_loading_delay")]
    pub loading_delay_ms: u64,
    /// Delay before the thank-you card mounts
    #[serde(default = "default_thank_you_delay")]
    pub thank_you_delay_ms: u64,
    /// Per-column factors for the project gallery parallax
    #[serde(default = "default_gallery_factors")]
    pub gallery_factors: Vec<f64>,
    /// Per-column factors for the testimonial parallax
    #[serde(default = "default_testimonial_factors")]
    pub testimonial_factors: Vec<f64>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            autoscroll_px_per_ms: default_autoscroll_rate(),
            reveal_duration_ms: default_reveal_duration(),
            reveal_easing: default_reveal_easing(),
            section_threshold: default_section_threshold(),
            card_stagger_ms: default_card_stagger(),
            skill_stagger_ms: default_skill_stagger(),
            letter_stagger_ms: default_letter_stagger(),
            loading_delay_ms: default_loading_delay(),
            thank_you_delay_ms: default_thank_you_delay(),
            gallery_factors: default_gallery_factors(),
            testimonial_factors: default_testimonial_factors(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Form relay endpoint accepting a JSON POST
    #[serde(default = "default_relay_endpoint")]
    pub endpoint: String,
    /// Site access key sent with every submission
    #[serde(default)]
    pub access_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_relay_endpoint(),
            access_key: None,
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistConfig {
    /// Mailing-list provider form action
    #[serde(default = "default_waitlist_action")]
    pub action_url: String,
    /// Name of the email input expected by the provider
    #[serde(default = "default_waitlist_email_field")]
    pub email_field: String,
    /// Name of the hidden anti-bot input; must be posted empty
    #[serde(default = "default_waitlist_honeypot")]
    pub honeypot_field: String,
}

impl Default for WaitlistConfig {
    fn default() -> Self {
        Self {
            action_url: default_waitlist_action(),
            email_field: default_waitlist_email_field(),
            honeypot_field: default_waitlist_honeypot(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when nothing is animating
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while animations are running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Terminal rows one "viewport" of the page maps to; 0 = terminal height
    #[serde(default)]
    pub viewport_rows: u16,
    /// Animate anchor jumps and page scrolling
    #[serde(default = "default_smooth_scroll")]
    pub smooth_scroll: bool,
    /// Duration of one smooth scroll
    #[serde(default = "default_scroll_duration")]
    pub scroll_duration_ms: u64,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            viewport_rows: 0,
            smooth_scroll: default_smooth_scroll(),
            scroll_duration_ms: default_scroll_duration(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name ("stone" or "charcoal")
    pub name: String,
    /// Optional color overrides
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a theme name or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Hex color overrides ("#rrggbb" or "rrggbb")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Page background
    pub background: Option<String>,
    /// Card / panel background
    pub surface: Option<String>,
    /// Body text
    pub text: Option<String>,
    /// Secondary text
    pub muted: Option<String>,
    /// Headings and highlights
    pub accent: Option<String>,
    /// Validation messages
    pub error: Option<String>,
    /// Confirmation messages
    pub success: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Optional TOML file overriding the built-in site content
    #[serde(default)]
    pub content_path: Option<PathBuf>,
}

fn default_theme_name() -> String {
    "stone".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_autoscroll_rate() -> f64 {
    0.5 / 16.67 // half a pixel per 60Hz frame
}

fn default_reveal_duration() -> u64 {
    1000
}

fn default_reveal_easing() -> EasingType {
    EasingType::EaseOut
}

fn default_section_threshold() -> f64 {
    0.1
}

fn default_card_stagger() -> u64 {
    100
}

fn default_skill_stagger() -> u64 {
    75
}

fn default_letter_stagger() -> u64 {
    100
}

fn default_loading_delay() -> u64 {
    1000
}

fn default_thank_you_delay() -> u64 {
    100
}

fn default_gallery_factors() -> Vec<f64> {
    vec![0.3, -0.2, 0.3]
}

fn default_testimonial_factors() -> Vec<f64> {
    vec![0.15, -0.2, 0.25]
}

fn default_relay_endpoint() -> String {
    "https://api.web3forms.com/submit".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_waitlist_action() -> String {
    "https://gmail.us18.list-manage.com/subscribe/post?u=4ec1739ba86ba38b8a4144f74&id=38c21f6372&f_id=0045b6e6f0".to_string()
}

fn default_waitlist_email_field() -> String {
    "EMAIL".to_string()
}

fn default_waitlist_honeypot() -> String {
    "b_4ec1739ba86ba38b8a4144f74_38c21f6372".to_string()
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_smooth_scroll() -> bool {
    true
}

fn default_scroll_duration() -> u64 {
    400
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }

    /// Get the site content override path (with tilde expansion)
    pub fn content_path(&self) -> Option<PathBuf> {
        self.site.content_path.as_deref().map(expand_tilde)
    }
}
