use clap::Parser;
use scoop_fund::config::{load_site_config, CliConfig, Command, LogFormat};
use scoop_fund::core::report::export_orders_csv;
use scoop_fund::domain::ports::OrderStore;
use scoop_fund::utils::error::ErrorSeverity;
use scoop_fund::utils::logger;
use scoop_fund::{
    Cart, FundError, FundraisingProgress, Newsletter, OrderDesk, RestStore, SiteConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(),
    }

    tracing::info!("Starting scoop-fund CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cli: CliConfig) -> scoop_fund::Result<()> {
    let CliConfig {
        config: config_path,
        store_url,
        store_key,
        command,
        ..
    } = cli;

    let config = match &command {
        Command::Menu => SiteConfig::from_file(&config_path)?,
        _ => {
            let config = load_site_config(&config_path, store_url, store_key)?;
            tracing::info!("✅ Configuration loaded and validated successfully");
            config
        }
    };
    let connect = || RestStore::new(&config);

    match command {
        Command::Menu => print_menu(&config),
        Command::Order(args) => {
            let menu = config.menu();
            if menu.is_empty() {
                return Err(FundError::ConfigError {
                    message: "no [[menu]] entries configured".to_string(),
                });
            }

            let mut cart = Cart::new();
            menu.fill_cart(&mut cart, &args.items)?;
            print_cart(&cart);

            if args.dry_run {
                tracing::info!("🔍 DRY RUN MODE - order not submitted");
                let today = chrono::Local::now().date_naive();
                args.form().validate(today)?;
                println!("✅ Order details are valid");
                return Ok(());
            }

            let desk = OrderDesk::new(connect()?);
            let today = chrono::Local::now().date_naive();
            let receipt = desk.submit_form(&mut cart, &args.form(), today).await?;
            println!("✅ {}", receipt.confirmation_message());
            println!("🧾 Order number: {}", receipt.order_id);
        }
        Command::Subscribe(args) => {
            let newsletter = Newsletter::new(connect()?);
            let subscriber = newsletter.subscribe(&args.form()).await?;
            println!(
                "✅ Thanks {}! {} is now subscribed to the newsletter.",
                subscriber.name, subscriber.email
            );
        }
        Command::Orders { csv } => {
            let orders = connect()?.list_orders().await?;
            for order in &orders {
                println!(
                    "#{} {} {} <{}> pickup {} {} [{}]",
                    order.id,
                    order.order_date.format("%Y-%m-%d %H:%M"),
                    order.customer_name,
                    order.customer_email,
                    order.pickup_date,
                    order.total_amount,
                    order.status
                );
                for item in &order.order_items {
                    println!(
                        "    {} x{} @ {} = {}",
                        item.item_name, item.quantity, item.unit_price, item.total_price
                    );
                }
            }
            println!("{} order(s)", orders.len());

            if let Some(path) = csv {
                let file = std::fs::File::create(&path)?;
                let rows = export_orders_csv(&orders, file)?;
                println!("📁 Wrote {} row(s) to {}", rows, path.display());
            }
        }
        Command::Subscribers => {
            let subscribers = connect()?.list_subscribers().await?;
            for subscriber in &subscribers {
                let joined = subscriber
                    .created_at
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{} <{}> joined {}{}",
                    subscriber.name,
                    subscriber.email,
                    joined,
                    if subscriber.is_active { "" } else { " (inactive)" }
                );
            }
            println!("{} subscriber(s)", subscribers.len());
        }
        Command::Progress => {
            let orders = connect()?.list_orders().await?;
            let progress = FundraisingProgress::from_orders(config.fundraising_goal(), &orders);
            println!("🍨 {}", config.fundraiser_name());
            println!(
                "Raised {} of {} ({:.0}%) from {} order(s)",
                progress.raised,
                progress.goal,
                progress.percent_of_goal(),
                progress.orders
            );
            println!("Donations included: {}", progress.donations);
            println!("Still to go: {}", progress.remaining());
        }
        Command::Ping => {
            connect()?.ping().await?;
            println!("✅ Connection successful");
        }
    }

    Ok(())
}

fn print_menu(config: &SiteConfig) {
    println!("🍨 {}", config.fundraiser_name());
    for item in config.menu().items() {
        match &item.description {
            Some(description) => println!("  {:<24} {:>8}  {}", item.name, item.price, description),
            None => println!("  {:<24} {:>8}", item.name, item.price),
        }
    }
}

fn print_cart(cart: &Cart) {
    for item in cart.items() {
        println!(
            "  {} x{} {:>10}",
            item.name,
            item.quantity,
            item.line_total()
        );
    }
    let totals = cart.totals();
    println!("  Subtotal: {}", totals.subtotal);
    println!("  Donation (10%): {}", totals.donation);
    println!("  Total: {}", totals.total);
}
