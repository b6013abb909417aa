// src/specs/card/colors.rs
//! Color Deriver.

use std::fmt;

use super::symbols;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    pub fn from_letter(c: char) -> Option<Color> {
        match c.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }

    /// Color indicator names as printed on the page.
    pub fn from_indicator(name: &str) -> Option<Color> {
        match name.trim() {
            "Red" => Some(Color::Red),
            "Blue" => Some(Color::Blue),
            "Green" => Some(Color::Green),
            "White" => Some(Color::White),
            "Black" => Some(Color::Black),
            _ => None,
        }
    }
}

/// Colors in first-seen order. Empty means colorless.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Colors(Vec<Color>);

impl Colors {
    pub const COLORLESS: &'static str = "colorless";

    pub fn colorless() -> Self {
        Colors(Vec::new())
    }

    pub fn is_colorless(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.0
    }

    fn push(&mut self, c: Color) {
        if !self.0.contains(&c) {
            self.0.push(c);
        }
    }
}

impl FromIterator<Color> for Colors {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut out = Colors::colorless();
        for c in iter {
            out.push(c);
        }
        out
    }
}

/// `WR`, or `colorless`.
impl fmt::Display for Colors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_colorless() {
            return f.write_str(Self::COLORLESS);
        }
        for c in &self.0 {
            write!(f, "{}", c.letter())?;
        }
        Ok(())
    }
}

/// A color indicator overrides the cost; otherwise every color letter in the cost counts
/// (hybrid and Phyrexian tokens can carry more than one). Glyph tokens such as `snow`
/// are not scanned for letters.
pub fn derive(mana_cost: Option<&[String]>, indicator: Option<&str>) -> Colors {
    if let Some(ind) = indicator {
        let from_indicator: Colors = ind
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter_map(Color::from_indicator)
            .collect();
        if !from_indicator.is_colorless() {
            return from_indicator;
        }
    }
    mana_cost
        .unwrap_or_default()
        .iter()
        .filter(|t| !symbols::is_glyph(t))
        .flat_map(|t| t.chars())
        .filter_map(Color::from_letter)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s!(*s)).collect()
    }

    #[test]
    fn cost_letters_in_first_seen_order() {
        let c = derive(Some(&toks(&["1", "W", "R"])), None);
        assert_eq!(c.as_slice(), &[Color::White, Color::Red]);
        assert_eq!(c.to_string(), "WR");

        let c = derive(Some(&toks(&["1", "BR", "BR", "BR"])), None);
        assert_eq!(c.to_string(), "BR");

        let c = derive(Some(&toks(&["4", "RP", "RP"])), None);
        assert_eq!(c.to_string(), "R");
    }

    #[test]
    fn generic_only_or_no_cost_is_colorless() {
        assert!(derive(Some(&toks(&["0"])), None).is_colorless());
        assert!(derive(None, None).is_colorless());
        assert_eq!(derive(Some(&toks(&["15"])), None).to_string(), "colorless");
    }

    #[test]
    fn indicator_overrides_cost() {
        let c = derive(Some(&toks(&["1"])), Some("Red"));
        assert_eq!(c.as_slice(), &[Color::Red]);

        let c = derive(Some(&toks(&["G", "U"])), Some("Black"));
        assert_eq!(c.to_string(), "B");
    }

    #[test]
    fn snow_glyph_is_not_white() {
        assert!(derive(Some(&toks(&["snow"])), None).is_colorless());
    }

    #[test]
    fn unknown_indicator_falls_back_to_cost() {
        assert_eq!(derive(Some(&toks(&["G"])), Some("Plaid")).to_string(), "G");
    }
}
