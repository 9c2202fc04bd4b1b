use cart_store::utils::error::{ErrorSeverity, Result};
use cart_store::utils::{logger, validation::Validate};
use cart_store::{
    Cart, CartOutcome, CartStore, CliConfig, Command, ConfigProvider, ConsoleNotifier, HttpApi,
    LocalStorage, ProductId, QuantityUpdate, TomlConfig,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let loaded = cli.config.as_ref().map(TomlConfig::from_file).transpose();

    // Logging comes up before a config error is reported so it reaches the log too.
    logger::init_cli_logger(cli.verbose, configured_log_level(&loaded));

    let toml_config = match loaded {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    tracing::info!("Starting cart-store CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &toml_config {
        Some(config) => run(config, &cli.command).await,
        None => run(&cli, &cli.command).await,
    };

    if let Err(e) = result {
        exit_with(e);
    }
}

/// Level from a successfully loaded TOML file; a failed load falls back to defaults.
fn configured_log_level(loaded: &Result<Option<TomlConfig>>) -> Option<&str> {
    loaded.as_ref().ok().and_then(Option::as_ref).and_then(TomlConfig::log_level)
}

async fn run<C: ConfigProvider + Validate>(config: &C, command: &Command) -> Result<()> {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }

    let api = HttpApi::from_config(config)?;
    let storage = LocalStorage::new(config.storage_path());
    let store = CartStore::restore(api.clone(), api, storage, ConsoleNotifier)?;

    let outcome = match *command {
        Command::Show => None,
        Command::Add { product_id } => Some(store.add_product(ProductId(product_id)).await),
        Command::Remove { product_id } => Some(store.remove_product(ProductId(product_id)).await),
        Command::Update { product_id, amount } => Some(
            store
                .set_quantity(QuantityUpdate {
                    product_id: ProductId(product_id),
                    amount,
                })
                .await,
        ),
    };

    if let Some(outcome) = outcome {
        tracing::debug!(?outcome, "Command finished");
        if outcome == CartOutcome::Updated {
            println!("✅ Cart updated");
        }
    }

    print_cart(&store.cart());
    Ok(())
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("🛒 Cart is empty");
        return;
    }

    println!("🛒 {} product(s), {} unit(s)", cart.len(), cart.item_count());
    for item in cart.items() {
        println!(
            "  #{:<6} {:<40} {:>3} x {:>10.2} = {:>10.2}",
            item.id,
            item.title,
            item.amount,
            item.price,
            item.subtotal()
        );
    }
    println!("  Total: {:.2}", cart.total());
}

fn exit_with(e: cart_store::CartError) -> ! {
    tracing::error!(
        "❌ cart-store failed: {} (Severity: {:?})",
        e,
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
