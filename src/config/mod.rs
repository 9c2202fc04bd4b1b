pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "cart-store")]
    #[command(about = "Storefront shopping cart backed by local storage and a stock API")]
    pub struct CliConfig {
        #[arg(long, default_value = "http://localhost:3333")]
        pub api_endpoint: String,

        #[arg(long, default_value = "./.cart")]
        pub storage_path: String,

        #[arg(long, help = "Abort lookups that take longer than this")]
        pub timeout_seconds: Option<u64>,

        #[arg(
            long = "header",
            value_parser = parse_header,
            help = "Extra request header as NAME=VALUE, may be repeated"
        )]
        pub headers: Vec<(String, String)>,

        #[arg(long, short, help = "Read settings from a TOML file instead of flags")]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
    pub enum Command {
        /// Print the current cart
        Show,
        /// Add one unit of a product
        Add { product_id: u64 },
        /// Remove a product line entirely
        Remove { product_id: u64 },
        /// Step a product's quantity one unit towards AMOUNT
        Update { product_id: u64, amount: u32 },
    }

    fn parse_header(raw: &str) -> std::result::Result<(String, String), String> {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
        Ok((name.trim().to_string(), value.trim().to_string()))
    }

    impl ConfigProvider for CliConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn storage_path(&self) -> &str {
            &self.storage_path
        }

        fn request_timeout_seconds(&self) -> Option<u64> {
            self.timeout_seconds
        }

        fn default_headers(&self) -> Vec<(String, String)> {
            self.headers.clone()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            use crate::utils::validation::*;

            validate_url("api_endpoint", &self.api_endpoint)?;
            validate_path("storage_path", &self.storage_path)?;
            if let Some(timeout) = self.timeout_seconds {
                validate_positive_number("timeout_seconds", timeout, 1)?;
            }
            for (name, _) in &self.headers {
                validate_non_empty_string("header", name)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_update_command_with_defaults() {
            let config = CliConfig::try_parse_from(["cart-store", "update", "5", "2"]).unwrap();

            assert_eq!(
                config.command,
                Command::Update {
                    product_id: 5,
                    amount: 2
                }
            );
            assert_eq!(config.api_endpoint(), "http://localhost:3333");
            assert_eq!(config.request_timeout_seconds(), None);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_parse_repeated_headers() {
            let config = CliConfig::try_parse_from([
                "cart-store",
                "--header",
                "Authorization=Bearer abc",
                "--header",
                "X-Client = cli",
                "show",
            ])
            .unwrap();

            assert_eq!(
                config.default_headers(),
                vec![
                    ("Authorization".to_string(), "Bearer abc".to_string()),
                    ("X-Client".to_string(), "cli".to_string()),
                ]
            );
        }

        #[test]
        fn test_malformed_header_is_rejected() {
            assert!(CliConfig::try_parse_from(["cart-store", "--header", "nope", "show"]).is_err());
        }

        #[test]
        fn test_invalid_endpoint_fails_validation() {
            let config =
                CliConfig::try_parse_from(["cart-store", "--api-endpoint", "nope", "show"]).unwrap();
            assert!(config.validate().is_err());
        }
    }
}
