/// Accent palette keyed by the user's dietary preference.
///
/// The accent tints both the mesh material and the scene's directional
/// light. Changing it never rebuilds a pipeline; a live mesh is repainted
/// in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorTheme {
    Meat,
    #[default]
    Vegetarian,
    Vegan,
}

impl ColorTheme {
    /// Linear RGB accent for this theme.
    pub fn accent_rgb(self) -> [f32; 3] {
        match self {
            // #ff0026
            ColorTheme::Meat => [1.0, 0.0, 38.0 / 255.0],
            // #009dff
            ColorTheme::Vegetarian => [0.0, 157.0 / 255.0, 1.0],
            // #00ff1e
            ColorTheme::Vegan => [0.0, 1.0, 30.0 / 255.0],
        }
    }

    /// Parse a theme name as supplied by the chat component.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "meat" | "non-veg" => Some(ColorTheme::Meat),
            "vegetarian" | "veg" => Some(ColorTheme::Vegetarian),
            "vegan" => Some(ColorTheme::Vegan),
            _ => None,
        }
    }
}
