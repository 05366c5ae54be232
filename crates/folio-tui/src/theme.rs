//! Page palette and loader
//!
//! Two built-in palettes with per-colour overrides from the config file.

use folio_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;

/// Page palette after config overrides
#[derive(Debug, Clone)]
pub struct Theme {
    /// Page background
    pub background: Color,
    /// Cards, inputs and the glassy navbar
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        stone()
    }
}

/// Light stone palette
pub fn stone() -> Theme {
    Theme {
        background: Color::Rgb(0xf5, 0xf5, 0xf4),
        surface: Color::Rgb(0xe7, 0xe5, 0xe4),
        text: Color::Rgb(0x1c, 0x19, 0x17),
        muted: Color::Rgb(0x78, 0x71, 0x6c),
        accent: Color::Rgb(0x44, 0x40, 0x3c),
        error: Color::Rgb(0xdc, 0x26, 0x26),
        success: Color::Rgb(0x16, 0xa3, 0x4a),
        border: Color::Rgb(0xd6, 0xd3, 0xd1),
    }
}

/// Dark charcoal palette
pub fn charcoal() -> Theme {
    Theme {
        background: Color::Rgb(0x11, 0x18, 0x27),
        surface: Color::Rgb(0x1f, 0x29, 0x37),
        text: Color::Rgb(0xf9, 0xfa, 0xfb),
        muted: Color::Rgb(0x9c, 0xa3, 0xaf),
        accent: Color::Rgb(0xc4, 0xb5, 0xfd),
        error: Color::Rgb(0xf8, 0x71, 0x71),
        success: Color::Rgb(0x4a, 0xde, 0x80),
        border: Color::Rgb(0x37, 0x41, 0x51),
    }
}

/// Parse a hex colour into an RGB `Color`
///
/// `#RRGGBB`, `RRGGBB` and the three-digit short forms are accepted
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Resolve the configured palette, falling back to stone
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "charcoal" | "dark" => charcoal(),
        "stone" | "light" => stone(),
        other => {
            tracing::warn!(theme = other, "Unknown theme, using stone");
            stone()
        }
    };

    apply_overrides(base, &config.colors)
}

/// Replace palette entries the config names
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots: [(&Option<String>, &mut Color); 7] = [
        (&overrides.background, &mut theme.background),
        (&overrides.surface, &mut theme.surface),
        (&overrides.text, &mut theme.text),
        (&overrides.muted, &mut theme.muted),
        (&overrides.accent, &mut theme.accent),
        (&overrides.error, &mut theme.error),
        (&overrides.success, &mut theme.success),
    ];

    for (hex, slot) in slots {
        if let Some(hex) = hex {
            match parse_hex_color(hex) {
                Some(color) => *slot = color,
                None => tracing::warn!(color = %hex, "Ignoring invalid colour override"),
            }
        }
    }

    theme
}

/// Blend `fg` towards `bg`; `opacity` 0 gives `bg`, 1 gives `fg`
///
/// Only RGB colours blend; named colours snap at half opacity.
pub fn fade(fg: Color, bg: Color, opacity: f64) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| (b as f64 + (f as f64 - b as f64) * t).round() as u8;
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        }
        _ if t >= 0.5 => fg,
        _ => bg,
    }
}

/// Available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["stone", "charcoal"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_6digit() {
        let color = parse_hex_color("#ff5500").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_3digit() {
        let color = parse_hex_color("f50").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "charcoal".to_string(),
            colors: ThemeColorOverrides {
                accent: Some("#ff0000".to_string()),
                error: Some("nope".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.accent, Color::Rgb(255, 0, 0)));
        assert_eq!(theme.error, charcoal().error);
        assert_eq!(theme.background, charcoal().background);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "neon".to_string(),
            colors: ThemeColorOverrides::default(),
        };
        assert_eq!(load_theme(&config).background, stone().background);
    }

    #[test]
    fn test_fade() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 0);
        assert_eq!(fade(fg, bg, 1.0), fg);
        assert_eq!(fade(fg, bg, 0.0), bg);
        assert_eq!(fade(fg, bg, 0.5), Color::Rgb(100, 50, 0));
        assert_eq!(fade(Color::Red, Color::Black, 0.4), Color::Black);
    }
}
