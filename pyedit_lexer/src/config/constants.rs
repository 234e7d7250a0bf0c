//! Fixed defaults that are not tunable through the TOML profiles

/// Foreground colour every style starts from before a theme is applied
pub const DEFAULT_COLOR: &str = "#aab2bf";

/// Background (paper) colour every style starts from
pub const DEFAULT_PAPER: &str = "#282c34";

/// Default font family
pub const DEFAULT_FONT_FAMILY: &str = "Consolas";

/// Default point size
pub const DEFAULT_FONT_SIZE: u32 = 14;

/// Theme file used when no path is configured
pub const DEFAULT_THEME_PATH: &str = "./resources/static/data/theme.json";

/// File extensions that get the Python classifier attached
pub const PYTHON_EXTENSIONS: &[&str] = &["py", "pyw"];
