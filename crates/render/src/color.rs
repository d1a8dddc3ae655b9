// Edge coloring

/// Framework-agnostic RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert from HSV; hue in degrees, saturation and value in [0, 1]
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let c = value * saturation;
        let hp = hue.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = value - c;
        Self {
            r: ((r1 + m) * 255.0).round() as u8,
            g: ((g1 + m) * 255.0).round() as u8,
            b: ((b1 + m) * 255.0).round() as u8,
        }
    }

    /// "#rrggbb" for SVG attributes
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One distinct hue per edge index, swept violet-to-red across the
/// spectrum so the colors stay distinguishable however many edges the
/// graph has.
pub fn spectrum(count: usize) -> Vec<Color> {
    (0..count)
        .map(|i| {
            let t = if count <= 1 {
                0.0
            } else {
                i as f64 / (count - 1) as f64
            };
            Color::from_hsv(270.0 * (1.0 - t), 0.85, 0.9)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::from_rgb(255, 0, 0));
        assert_eq!(Color::from_hsv(120.0, 1.0, 1.0), Color::from_rgb(0, 255, 0));
        assert_eq!(Color::from_hsv(240.0, 1.0, 1.0), Color::from_rgb(0, 0, 255));
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(Color::from_rgb(173, 216, 230).to_hex(), "#add8e6");
    }

    #[test]
    fn test_spectrum_sized_to_edges_and_distinct() {
        let colors = spectrum(12);
        assert_eq!(colors.len(), 12);
        for window in colors.windows(2) {
            assert_ne!(window[0], window[1]);
        }
        // Sweep starts violet-ish and ends red
        assert!(colors[0].b > colors[0].g);
        assert_eq!(colors[11], Color::from_hsv(0.0, 0.85, 0.9));
    }

    #[test]
    fn test_spectrum_degenerate_sizes() {
        assert!(spectrum(0).is_empty());
        assert_eq!(spectrum(1).len(), 1);
    }
}
