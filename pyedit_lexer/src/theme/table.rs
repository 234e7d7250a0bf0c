//! Style attribute table indexed by [`StyleId`]

use super::color::Color;
use super::font::{Font, FontWeight};
use crate::highlight::StyleId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FOREGROUND: Color = Color::rgb(0xaa, 0xb2, 0xbf);
pub const DEFAULT_PAPER: Color = Color::rgb(0x28, 0x2c, 0x34);

/// Paint attributes of one style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleAttributes {
    pub color: Color,
    pub paper: Color,
    pub font: Font,
}

impl Default for StyleAttributes {
    fn default() -> Self {
        Self {
            color: DEFAULT_FOREGROUND,
            paper: DEFAULT_PAPER,
            font: Font::default(),
        }
    }
}

/// One rule from a theme feed. `None` fields leave the current value alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRule {
    pub style: StyleId,
    pub color: Option<Color>,
    pub bg_color: Option<Color>,
    pub font: Option<Font>,
}

impl ThemeRule {
    pub fn new(style: StyleId) -> Self {
        Self {
            style,
            color: None,
            bg_color: None,
            font: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.bg_color.is_none() && self.font.is_none()
    }
}

/// Attributes for every style, stored in an array indexed by style id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    defaults: StyleAttributes,
    styles: [StyleAttributes; StyleId::COUNT],
}

impl StyleTable {
    /// Every style starts from `defaults`
    pub fn with_defaults(defaults: StyleAttributes) -> Self {
        let styles = std::array::from_fn(|_| defaults.clone());
        Self { defaults, styles }
    }

    /// Built-in dark palette used until a theme overrides it
    pub fn one_dark() -> Self {
        let mut table = Self::default();

        let palette = [
            (StyleId::Default, DEFAULT_FOREGROUND),
            (StyleId::Keyword, Color::rgb(0xc6, 0x78, 0xdd)),
            (StyleId::Types, Color::rgb(0x56, 0xb6, 0xc2)),
            (StyleId::String, Color::rgb(0x98, 0xc3, 0x79)),
            (StyleId::KeyArgs, Color::rgb(0xc6, 0x78, 0xdd)),
            (StyleId::Brackets, Color::rgb(0xc6, 0x78, 0xdd)),
            (StyleId::Comments, Color::rgb(0x77, 0x77, 0x77)),
            (StyleId::Constants, Color::rgb(0xd1, 0x9a, 0x5e)),
            (StyleId::Functions, Color::rgb(0x61, 0xaf, 0xd1)),
            (StyleId::Classes, Color::rgb(0xc6, 0x8f, 0x55)),
            (StyleId::FunctionDef, Color::rgb(0x61, 0xaf, 0xd1)),
        ];
        for (style, color) in palette {
            table.set_color(style, color);
        }

        let bold = Font::default().with_weight(FontWeight::Bold);
        for style in [
            StyleId::Default,
            StyleId::Keyword,
            StyleId::Classes,
            StyleId::FunctionDef,
        ] {
            table.set_font(style, bold.clone());
        }

        table
    }

    pub fn defaults(&self) -> &StyleAttributes {
        &self.defaults
    }

    pub fn resolve(&self, style: StyleId) -> &StyleAttributes {
        &self.styles[style.index()]
    }

    /// Resolve by theme key (exact match)
    pub fn resolve_name(&self, name: &str) -> Option<&StyleAttributes> {
        StyleId::from_name(name).map(|style| self.resolve(style))
    }

    pub fn set_color(&mut self, style: StyleId, color: Color) {
        self.styles[style.index()].color = color;
    }

    pub fn set_paper(&mut self, style: StyleId, paper: Color) {
        self.styles[style.index()].paper = paper;
    }

    pub fn set_font(&mut self, style: StyleId, font: Font) {
        self.styles[style.index()].font = font;
    }

    /// Apply the attributes a rule sets; omitted ones keep their current value
    pub fn apply(&mut self, rule: &ThemeRule) {
        if let Some(color) = rule.color {
            self.set_color(rule.style, color);
        }
        if let Some(paper) = rule.bg_color {
            self.set_paper(rule.style, paper);
        }
        if let Some(font) = &rule.font {
            self.set_font(rule.style, font.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleId, &StyleAttributes)> {
        StyleId::ALL.iter().map(move |&style| (style, self.resolve(style)))
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::with_defaults(StyleAttributes::default())
    }
}
