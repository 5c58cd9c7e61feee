use anyhow::Context;
use clap::Parser;
use pos_client::ClientConfig;
use pos_terminal::config::SessionConfig;
use pos_terminal::logger::init_logger_with_file;
use pos_terminal::{PosSession, QuantityUpdate, ScanOutcome, TracingNotifier, scan_channel};
use rust_decimal::Decimal;
use shared::models::ProductRef;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Line-mode register: scanned codes on stdin, `:commands` for everything else
#[derive(Debug, Parser)]
#[command(name = "pos-terminal", version)]
struct Args {
    /// Backend base URL (overrides POS_SERVER_URL)
    #[arg(long)]
    server_url: Option<String>,

    /// Tenant bearer token (overrides POS_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Request timeout in seconds (overrides POS_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,

    /// Log level when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Write JSON logs
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,

    /// Directory for rolling log files
    #[arg(long, env = "LOG_DIR")]
    log_dir: Option<String>,
}

const HELP: &str = "\
<digits>                 scan a barcode
:list                    show products
:add <id> | :deal <id>   add item / deal from the grid
:opt <variant> <option>  select a variant option
:ok | :cancel            confirm / cancel the pending selection
:qty <n> <count>         set quantity of cart line n
:rm <n>                  remove cart line n
:discount <amount>       set discount
:pay <method id>         choose payment method
:name | :email | :notes  set order details
:cart                    show cart and totals
:clear                   clear the cart
:checkout                place the order
:quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_logger_with_file(Some(&args.log_level), args.log_json, args.log_dir.as_deref());

    let mut client_config = ClientConfig::from_env();
    if let Some(url) = args.server_url {
        client_config.base_url = url;
    }
    if let Some(token) = args.token {
        client_config = client_config.with_token(token);
    }
    if let Some(seconds) = args.timeout {
        client_config = client_config.with_timeout(seconds);
    }
    let client = Arc::new(
        client_config
            .build_http_client()
            .context("failed to build HTTP client")?,
    );

    let config = SessionConfig::from_env();
    let (scans_tx, mut scans_rx) = scan_channel(config.scan_queue_capacity);
    let mut session = PosSession::new(config, client.clone(), client, Arc::new(TracingNotifier));

    if !session.start().await {
        eprintln!("catalog unavailable; retry with :refresh");
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(command) = line.strip_prefix(':') else {
            scans_tx.push(line);
            for outcome in session.drain_scans(&mut scans_rx) {
                report(outcome.map(describe));
            }
            continue;
        };

        let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
        let rest = rest.trim();
        match name {
            "quit" | "q" => break,
            "help" => println!("{HELP}"),
            "refresh" => {
                let category = Some(rest).filter(|c| !c.is_empty());
                session.refresh_catalog(category).await;
            }
            "list" => print_catalog(&session),
            "add" => report(session.choose_product(&ProductRef::item(rest)).map(describe)),
            "deal" => report(session.choose_product(&ProductRef::deal(rest)).map(describe)),
            "opt" => match rest.split_once(' ') {
                Some((variant, option)) => {
                    let selected = session.select_option(variant, option.trim());
                    let ready = session.pending_selection().is_some_and(|p| p.can_confirm());
                    report(selected.map(|()| format!("selected (ready: {ready})")));
                }
                None => eprintln!("usage: :opt <variant> <option>"),
            },
            "ok" => report(session.confirm_selection().map(describe)),
            "cancel" => {
                session.cancel_selection();
            }
            "qty" => {
                let mut parts = rest.split_whitespace();
                match (
                    parts.next().and_then(|n| line_id_at(&session, n)),
                    parts.next().and_then(|q| q.parse::<i32>().ok()),
                ) {
                    (Some(line_id), Some(quantity)) => {
                        if let Some(QuantityUpdate::Updated { quantity }) =
                            session.set_quantity(&line_id, quantity)
                        {
                            println!("quantity {quantity}");
                        }
                    }
                    _ => eprintln!("usage: :qty <line> <count>"),
                }
            }
            "rm" => match line_id_at(&session, rest) {
                Some(line_id) => {
                    session.remove_line(&line_id);
                }
                None => eprintln!("usage: :rm <line>"),
            },
            "discount" => match Decimal::from_str(rest) {
                Ok(amount) => session.set_discount(amount),
                Err(e) => eprintln!("invalid amount: {e}"),
            },
            "pay" => {
                if !session.select_payment_method(rest) {
                    eprintln!("unknown payment method: {rest}");
                }
            }
            "name" => session.set_customer_name(rest),
            "email" => session.set_customer_email(rest),
            "notes" => session.set_notes(rest),
            "cart" => print_cart(&session),
            "clear" => session.clear_cart(),
            "checkout" => match session.checkout().await {
                Ok(receipt) => println!(
                    "order {} placed, total {}",
                    receipt.order_number,
                    session.format_amount(receipt.totals.total)
                ),
                Err(e) => eprintln!("{e}"),
            },
            other => eprintln!("unknown command :{other} (try :help)"),
        }
    }

    session.close();
    Ok(())
}

fn describe(outcome: ScanOutcome) -> String {
    match outcome {
        ScanOutcome::Added { quantity, .. } => format!("added (x{quantity})"),
        ScanOutcome::AwaitingSelection => "choose options, then :ok".to_string(),
    }
}

fn report<E: std::fmt::Display>(result: Result<String, E>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(e) => eprintln!("{e}"),
    }
}

/// 1-based cart line index to line id
fn line_id_at(session: &PosSession, index: &str) -> Option<String> {
    let n: usize = index.trim().parse().ok()?;
    session
        .cart()
        .lines()
        .get(n.checked_sub(1)?)
        .map(|l| l.line_id.clone())
}

fn print_catalog(session: &PosSession) {
    let catalog = session.catalog();
    if session.is_catalog_stale() {
        println!("(catalog may be out of date)");
    }
    for item in &catalog.items {
        let stock = if item.quantity <= 0 { " [out of stock]" } else { "" };
        println!(
            "  {:<20} {:<28} {}{stock}",
            item.id,
            item.name,
            session.format_amount(item.price)
        );
        for variant in &item.variants {
            let options: Vec<&str> = variant.options.iter().map(|o| o.name.as_str()).collect();
            let required = if variant.required { "*" } else { "" };
            println!("      {}{required}: {}", variant.name, options.join(" | "));
        }
    }
    for deal in &catalog.deals {
        println!(
            "  {:<20} {:<28} {} (deal)",
            deal.id,
            deal.name,
            session.format_amount(deal.price)
        );
    }
    let methods: Vec<String> = catalog
        .payment_methods
        .iter()
        .map(|m| format!("{} ({})", m.id, m.name))
        .collect();
    println!("  payment: {}", methods.join(", "));
}

fn print_cart(session: &PosSession) {
    for (i, line) in session.cart().lines().iter().enumerate() {
        println!(
            "  {:>2}. {:<36} x{:<3} {}",
            i + 1,
            line.display_name(),
            line.quantity,
            session.format_amount(line.line_total())
        );
    }
    let totals = session.totals();
    println!("  subtotal {}", session.format_amount(totals.subtotal));
    println!("  tax      {}", session.format_amount(totals.tax));
    println!("  discount {}", session.format_amount(totals.discount));
    println!("  total    {}", session.format_amount(totals.total));
    println!(
        "  {} item(s), payment: {}",
        totals.item_count,
        session.cart().payment_method().unwrap_or("-")
    );
}
