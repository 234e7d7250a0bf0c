// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    theme: ThemeLimits,
    document: DocumentLimits,
    highlight: HighlightLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct ThemeLimits {
    max_theme_file_size: u64,
    max_theme_rules: usize,
}

#[derive(serde::Deserialize)]
struct DocumentLimits {
    max_document_size: u64,
    binary_sniff_length: usize,
    max_open_documents: usize,
}

#[derive(serde::Deserialize)]
struct HighlightLimits {
    max_checkpoints_per_document: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PYEDIT_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=PYEDIT_CONFIG_DIR");

    let profile = env::var("PYEDIT_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("PYEDIT_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the pyedit_lexer directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_THEME_FILE_SIZE: u64 = 16 * 1024 * 1024;
    const ABSOLUTE_MAX_DOCUMENT_SIZE: u64 = 1_000_000_000;

    if config.theme.max_theme_file_size == 0
        || config.theme.max_theme_file_size > ABSOLUTE_MAX_THEME_FILE_SIZE
    {
        panic!("LIMITS: max_theme_file_size must be in 1..={}", ABSOLUTE_MAX_THEME_FILE_SIZE);
    }

    // Eleven styles must always fit
    if config.theme.max_theme_rules < 11 {
        panic!("LIMITS: max_theme_rules must allow at least one rule per style");
    }

    if config.document.max_document_size > ABSOLUTE_MAX_DOCUMENT_SIZE {
        panic!("LIMITS: max_document_size exceeds absolute maximum");
    }

    if config.document.binary_sniff_length == 0 {
        panic!("LIMITS: binary_sniff_length cannot be zero");
    }

    if config.logging.log_buffer_size < 100 {
        panic!("LIMITS: log_buffer_size too small (min: 100)");
    }

    if profile == "production" && config.highlight.max_checkpoints_per_document == 0 {
        panic!("PRODUCTION: string state checkpoints must be enabled");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod theme {{
        pub const MAX_THEME_FILE_SIZE: u64 = {};
        pub const MAX_THEME_RULES: usize = {};
    }}

    pub mod document {{
        pub const MAX_DOCUMENT_SIZE: u64 = {};
        pub const BINARY_SNIFF_LENGTH: usize = {};
        pub const MAX_OPEN_DOCUMENTS: usize = {};
    }}

    pub mod highlight {{
        pub const MAX_CHECKPOINTS_PER_DOCUMENT: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.theme.max_theme_file_size,
        config.theme.max_theme_rules,
        config.document.max_document_size,
        config.document.binary_sniff_length,
        config.document.max_open_documents,
        config.highlight.max_checkpoints_per_document,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
