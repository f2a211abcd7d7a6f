// Application configuration, loaded from environment variables and CLI flags.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_WORDS: usize = 5000;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Reward catalog JSON. The bundled catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// SEO page configuration JSON. The bundled pages are used when unset.
    pub pages_path: Option<PathBuf>,
    /// Directory containing the built guide site to serve as a fallback.
    pub static_dir: Option<PathBuf>,
    /// Largest `minWords` accepted by the ad-hoc paragraph endpoint.
    pub max_words: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            catalog_path: None,
            pages_path: None,
            static_dir: None,
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables and CLI arguments.
    ///
    /// Environment variables:
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `CATALOG_PATH` - reward catalog JSON file
    /// - `SEO_PAGES_PATH` - SEO page configuration JSON file
    /// - `STATIC_DIR` - built site directory for static file serving
    /// - `SEO_MAX_WORDS` - cap on requested word counts (default: 5000)
    ///
    /// CLI flags (take precedence):
    /// - `--port <PORT>`
    /// - `--catalog <PATH>`
    /// - `--pages <PATH>`
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::load_from(&args, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from explicit arguments and an env lookup.
    pub fn load_from(args: &[String], env: impl Fn(&str) -> Option<String>) -> Self {
        let port = Self::parse_cli_value(args, "--port")
            .and_then(|v| v.parse().ok())
            .or_else(|| env("PORT").and_then(|v| v.parse().ok()))
            .unwrap_or(DEFAULT_PORT);

        let catalog_path = Self::parse_cli_value(args, "--catalog")
            .or_else(|| env("CATALOG_PATH"))
            .map(PathBuf::from);

        let pages_path = Self::parse_cli_value(args, "--pages")
            .or_else(|| env("SEO_PAGES_PATH"))
            .map(PathBuf::from);

        let static_dir = env("STATIC_DIR").map(PathBuf::from);

        let max_words = env("SEO_MAX_WORDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_WORDS);

        Config {
            port,
            catalog_path,
            pages_path,
            static_dir,
            max_words,
        }
    }

    /// Parse a CLI flag value like `--port 8080`.
    fn parse_cli_value(args: &[String], flag: &str) -> Option<String> {
        args.windows(2).find_map(|pair| {
            if pair[0] == flag {
                Some(pair[1].clone())
            } else {
                None
            }
        })
    }
}
