#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }

    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(r, g, b, a)
    }

    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let (r, g, b, a) = match s.len() {
            6 => (
                u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
                255,
            ),
            8 => (
                u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
                u8::from_str_radix(&s[6..8], 16).unwrap_or(255),
            ),
            _ => (0, 0, 0, 255),
        };
        Color(r, g, b, a)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }

    /// Scale the RGB channels; `factor` above 1.0 brightens, below darkens.
    pub fn scaled(self, factor: f32) -> Self {
        let s = |c: u8| ((c as f32 * factor).round().clamp(0.0, 255.0)) as u8;
        Color(s(self.0), s(self.1), s(self.2), self.3)
    }
}

/// Resolved style a widget draws with. The stylesheet loader that produces
/// these lives outside the core; widgets receive them by shared reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub background: Color,
    pub foreground: Color,
    pub outline: Color,
    pub selection: Color,
    pub corner_radius: f32,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            background: Color::from_hex("#2B2B2B"),
            foreground: Color::from_hex("#E0E0E0"),
            outline: Color::from_hex("#555555"),
            selection: Color::from_rgba(40, 120, 200, 120),
            corner_radius: 5.0,
        }
    }
}

impl Style {
    /// Background shade used while a widget is focused.
    pub fn focused_background(&self) -> Color {
        let c = self.background;
        c.scaled(if c.0 > 128 { 0.4 } else { 0.7 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_rgb_and_rgba() {
        assert_eq!(Color::from_hex("#FF5733"), Color(255, 87, 51, 255));
        assert_eq!(Color::from_hex("#FF5733AA"), Color(255, 87, 51, 170));
        assert_eq!(Color::from_hex("nonsense"), Color(0, 0, 0, 255));
    }

    #[test]
    fn scaled_clamps_channels() {
        assert_eq!(Color(200, 200, 200, 255).scaled(2.0), Color(255, 255, 255, 255));
        assert_eq!(Color(100, 100, 100, 40).scaled(0.5).3, 40);
    }
}
