use clap::Parser;
use std::path::PathBuf;

/// Runtime configuration for the storefront shell.
#[derive(Parser, Debug, Clone)]
#[command(name = "storefront", about = "Role-scoped storefront command shell")]
pub struct Config {
    /// Tracing filter directives. `RUST_LOG` takes precedence when set.
    #[arg(long, default_value = "info,storefront=debug", env = "STOREFRONT_LOG")]
    pub log_filter: String,

    /// Start with empty stores instead of the demo accounts and catalog
    #[arg(long, default_value_t = false, env = "STOREFRONT_NO_SEED")]
    pub no_seed: bool,

    /// Prompt printed before each line in interactive mode
    #[arg(long, default_value = "> ", env = "STOREFRONT_PROMPT")]
    pub prompt: String,

    /// Read commands from this file instead of stdin
    #[arg(long, env = "STOREFRONT_SCRIPT")]
    pub script: Option<PathBuf>,

    /// Render outcomes as JSON lines
    #[arg(long, default_value_t = false, env = "STOREFRONT_JSON")]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["storefront"]).unwrap();
        assert!(!config.no_seed);
        assert!(!config.json);
        assert_eq!(config.prompt, "> ");
        assert!(config.script.is_none());
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "storefront",
            "--no-seed",
            "--json",
            "--script",
            "demo.txt",
            "--log-filter",
            "warn",
        ])
        .unwrap();
        assert!(config.no_seed);
        assert!(config.json);
        assert_eq!(config.script, Some(PathBuf::from("demo.txt")));
        assert_eq!(config.log_filter, "warn");
    }
}
