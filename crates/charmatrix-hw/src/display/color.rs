//! Foreground/background palettes and the per-character prefix byte.
//!
//! Each character cell carries one prefix byte combining both colors:
//! `0x21 + 0x21 * fg + 0x0C * bg`. Two pairs leave the byte range (yellow on
//! orange and yellow on purple); those render on the default black
//! background instead.

/// Foreground (glyph) colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Foreground {
    Orange = 0,
    #[default]
    White = 1,
    Cyan = 2,
    Green = 3,
    Magenta = 4,
    Red = 5,
    Yellow = 6,
}

impl Foreground {
    /// Every foreground color, in code order.
    pub const ALL: [Foreground; 7] = [
        Foreground::Orange,
        Foreground::White,
        Foreground::Cyan,
        Foreground::Green,
        Foreground::Magenta,
        Foreground::Red,
        Foreground::Yellow,
    ];

    /// Looks up a color by its exact palette name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "orange" => Some(Foreground::Orange),
            "white" => Some(Foreground::White),
            "cyan" => Some(Foreground::Cyan),
            "green" => Some(Foreground::Green),
            "magenta" => Some(Foreground::Magenta),
            "red" => Some(Foreground::Red),
            "yellow" => Some(Foreground::Yellow),
            _ => None,
        }
    }

    /// Resolves an optional color name, falling back to white when the name
    /// is absent, empty or unknown.
    pub fn resolve(name: Option<&str>) -> Self {
        name.and_then(Self::from_name).unwrap_or_default()
    }

    /// Palette code of this color.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Palette name of this color.
    pub const fn name(self) -> &'static str {
        match self {
            Foreground::Orange => "orange",
            Foreground::White => "white",
            Foreground::Cyan => "cyan",
            Foreground::Green => "green",
            Foreground::Magenta => "magenta",
            Foreground::Red => "red",
            Foreground::Yellow => "yellow",
        }
    }
}

impl std::fmt::Display for Foreground {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Background (cell) colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Background {
    #[default]
    Black = 0,
    Green = 1,
    Gray = 2,
    Orange = 3,
    Purple = 4,
}

impl Background {
    /// Every background color, in code order.
    pub const ALL: [Background; 5] = [
        Background::Black,
        Background::Green,
        Background::Gray,
        Background::Orange,
        Background::Purple,
    ];

    /// Looks up a color by its exact palette name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "black" => Some(Background::Black),
            "green" => Some(Background::Green),
            "gray" => Some(Background::Gray),
            "orange" => Some(Background::Orange),
            "purple" => Some(Background::Purple),
            _ => None,
        }
    }

    /// Resolves an optional color name, falling back to black when the name
    /// is absent, empty or unknown.
    pub fn resolve(name: Option<&str>) -> Self {
        name.and_then(Self::from_name).unwrap_or_default()
    }

    /// Palette code of this color.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Palette name of this color.
    pub const fn name(self) -> &'static str {
        match self {
            Background::Black => "black",
            Background::Green => "green",
            Background::Gray => "gray",
            Background::Orange => "orange",
            Background::Purple => "purple",
        }
    }
}

impl std::fmt::Display for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const fn raw_prefix(fg: Foreground, bg: Background) -> u16 {
    0x21 + 0x21 * fg.code() as u16 + 0x0C * bg.code() as u16
}

/// Returns false for pairs whose prefix does not fit in a byte.
pub const fn prefix_in_range(fg: Foreground, bg: Background) -> bool {
    raw_prefix(fg, bg) <= 0xFF
}

/// Computes the prefix byte for a foreground/background pair.
///
/// Pairs whose prefix would not fit in a byte fall back to a black
/// background.
pub const fn prefix_byte(fg: Foreground, bg: Background) -> u8 {
    if prefix_in_range(fg, bg) {
        raw_prefix(fg, bg) as u8
    } else {
        raw_prefix(fg, Background::Black) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_byte() {
        assert_eq!(prefix_byte(Foreground::Orange, Background::Black), 0x21);
        assert_eq!(prefix_byte(Foreground::White, Background::Black), 0x42);
        assert_eq!(prefix_byte(Foreground::Green, Background::Black), 0x84);
        assert_eq!(prefix_byte(Foreground::Cyan, Background::Gray), 0x7B);
        assert_eq!(prefix_byte(Foreground::Yellow, Background::Gray), 0xFF);
        assert_eq!(prefix_byte(Foreground::Red, Background::Purple), 0xF6);
    }

    #[test]
    fn test_prefix_out_of_range_pairs() {
        let yellow_on_black = prefix_byte(Foreground::Yellow, Background::Black);
        assert_eq!(yellow_on_black, 0xE7);
        assert_eq!(
            prefix_byte(Foreground::Yellow, Background::Orange),
            yellow_on_black
        );
        assert_eq!(
            prefix_byte(Foreground::Yellow, Background::Purple),
            yellow_on_black
        );

        let mut overflowing = 0;
        for fg in Foreground::ALL {
            for bg in Background::ALL {
                if !prefix_in_range(fg, bg) {
                    overflowing += 1;
                } else {
                    assert_eq!(prefix_byte(fg, bg) as u16, raw_prefix(fg, bg));
                }
            }
        }
        assert_eq!(overflowing, 2);
    }

    #[test]
    fn test_codes_are_contiguous() {
        for (i, fg) in Foreground::ALL.iter().enumerate() {
            assert_eq!(fg.code() as usize, i);
            assert_eq!(Foreground::from_name(fg.name()), Some(*fg));
        }
        for (i, bg) in Background::ALL.iter().enumerate() {
            assert_eq!(bg.code() as usize, i);
            assert_eq!(Background::from_name(bg.name()), Some(*bg));
        }
    }

    #[test]
    fn test_resolve_fallbacks() {
        assert_eq!(Foreground::resolve(None), Foreground::White);
        assert_eq!(Foreground::resolve(Some("")), Foreground::White);
        assert_eq!(Foreground::resolve(Some("blue")), Foreground::White);
        assert_eq!(Foreground::resolve(Some("Green")), Foreground::White);
        assert_eq!(Foreground::resolve(Some("red")), Foreground::Red);

        assert_eq!(Background::resolve(None), Background::Black);
        assert_eq!(Background::resolve(Some("")), Background::Black);
        assert_eq!(Background::resolve(Some("white")), Background::Black);
        assert_eq!(Background::resolve(Some("purple")), Background::Purple);
    }
}
