#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MandelbrotColourMapKinds {
    #[default]
    BlueWhiteGradient,
    EscapeFlat,
}

impl MandelbrotColourMapKinds {
    pub const ALL: &'static [Self] = &[Self::BlueWhiteGradient, Self::EscapeFlat];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::BlueWhiteGradient => "Blue-white gradient",
            Self::EscapeFlat => "Escape flat",
        }
    }
}

impl std::fmt::Display for MandelbrotColourMapKinds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}
