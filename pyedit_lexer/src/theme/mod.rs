//! Style attribute table and theme loading
//!
//! The table is consulted only to turn a [`StyleId`](crate::highlight::StyleId)
//! into paint attributes. Classification never looks at it.

pub mod color;
pub mod font;
pub mod loader;
pub mod table;

pub use color::{Color, ColorError};
pub use font::{Font, FontWeight};
pub use loader::{
    load_theme_file, parse_theme, ThemeError, ThemeLoadReport, ThemeLoader, ThemeWarning,
};
pub use table::{StyleAttributes, StyleTable, ThemeRule};
