//! rko-calc CLI.
//!
//! Compares monthly banking costs across every published plan, or gives
//! a coarse per-bank estimate band with the older coefficient model.
//!
//! ```sh
//! # Full comparison for a sole proprietor
//! rko-calc compare --org ip --payments 30 --withdrawal 150000 --deposit 50000
//!
//! # Same request from a JSON document
//! rko-calc compare --request request.json
//!
//! # Legacy one-bank estimate
//! rko-calc estimate --bank tinkoff --payments 20 --cash 100000 \
//!     --acquiring 300000 --acquiring-type offline
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use validator::Validate;

use rko_calc::application::{CalcRequest, CoeffEstimator, TariffEngine};
use rko_calc::config::{default_config_path, AppConfig};
use rko_calc::domain::{
    AcquiringChannel, BankId, CalcInputs, EstimateInputs, OrgForm, TariffCalcResult,
};
use rko_calc::infrastructure::{legacy_coeffs, load_or_builtin};

/// Monthly service-cost calculator for small-business bank accounts.
#[derive(Parser, Debug)]
#[command(
    name = "rko-calc",
    version,
    about = "Compare monthly banking costs for small businesses",
    long_about = "Compares the monthly cost of every published service plan \
                  across banks for the given usage profile.\n\n\
                  Default config: ~/.config/rko-calc/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "RKO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare all published plans for the given monthly usage.
    Compare {
        /// Legal form: ip or ooo.
        #[arg(long, default_value = "ip")]
        org: String,

        /// Outgoing payments to other companies, operations per month.
        #[arg(long, default_value_t = 0.0)]
        payments: f64,

        /// Withdrawals to personal cards, rubles per month.
        #[arg(long, default_value_t = 0.0)]
        withdrawal: f64,

        /// Cash deposits, rubles per month.
        #[arg(long, default_value_t = 0.0)]
        deposit: f64,

        /// Read the request from a JSON file instead of the flags above.
        #[arg(long)]
        request: Option<PathBuf>,
    },

    /// Coarse estimate band for one bank (older coefficient model).
    Estimate {
        /// Bank identifier: alfa, tinkoff, tochka, modulbank or vtb.
        #[arg(long)]
        bank: String,

        /// Monthly turnover, rubles (shown for context only).
        #[arg(long, default_value_t = 0.0)]
        turnover: f64,

        /// Outgoing payments per month.
        #[arg(long, default_value_t = 0.0)]
        payments: f64,

        /// Cash volume, rubles per month.
        #[arg(long, default_value_t = 0.0)]
        cash: f64,

        /// Acquiring turnover, rubles per month.
        #[arg(long, default_value_t = 0.0)]
        acquiring: f64,

        /// Acquiring channel: online or offline.
        #[arg(long, default_value = "online")]
        acquiring_type: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg.logging.level);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            init_tracing("info");
            error!(
                "Failed to load config from {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            AppConfig::default()
        }
    };

    match cli.command {
        Command::Compare {
            org,
            payments,
            withdrawal,
            deposit,
            request,
        } => {
            let inputs = match request {
                Some(path) => read_request(&path)?,
                None => CalcInputs {
                    org: org.parse()?,
                    payments,
                    withdrawal,
                    deposit,
                },
            };
            run_compare(&cfg, &inputs);
        }
        Command::Estimate {
            bank,
            turnover,
            payments,
            cash,
            acquiring,
            acquiring_type,
        } => {
            let bank: BankId = bank.parse()?;
            let channel: AcquiringChannel = acquiring_type.parse()?;
            run_estimate(
                bank,
                &EstimateInputs {
                    turnover,
                    payments,
                    cash,
                    acquiring,
                    channel,
                },
            )?;
        }
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .try_init();
}

/// Parse and validate a JSON request document.
fn read_request(path: &std::path::Path) -> Result<CalcInputs, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    let request: CalcRequest = serde_json::from_str(&raw)?;
    request.validate()?;
    Ok(request.into())
}

fn run_compare(cfg: &AppConfig, inputs: &CalcInputs) {
    let links = cfg.ref_links();
    let catalog = load_or_builtin(cfg.catalog.path.as_deref(), &links);
    info!(
        banks = catalog.banks.len(),
        plans = catalog.plan_count(),
        updated_at = %catalog.updated_at,
        "catalog ready"
    );

    // Plans not sold to the chosen legal form are still priced, but marked.
    let inapplicable: Vec<String> = catalog
        .banks
        .iter()
        .flat_map(|b| &b.plans)
        .filter(|p| !p.applies_to(inputs.org))
        .map(|p| p.id.clone())
        .collect();

    let engine = TariffEngine::new(Arc::new(catalog));
    let results = engine.calculate(inputs);

    println!(
        "Расчёт для {} — платежей: {}, вывод: {} ₽, наличные: {} ₽",
        match inputs.org {
            OrgForm::Ip => "ИП",
            OrgForm::Ooo => "ООО",
        },
        inputs.payments,
        inputs.withdrawal,
        inputs.deposit
    );

    let mut current_bank: Option<BankId> = None;
    for r in &results {
        if current_bank != Some(r.bank_id) {
            current_bank = Some(r.bank_id);
            println!("\n{}", r.bank_name);
        }
        print_plan(r, inapplicable.contains(&r.tariff_id));
    }

    println!("\nРасчёты носят ориентировочный характер: точные условия подтверждает банк.");
}

fn print_plan(r: &TariffCalcResult, inapplicable: bool) {
    let monthly = if r.monthly_fee_is_estimate {
        format!("от {} (зависит от оборота)", format_rub(r.monthly_fee))
    } else {
        format_rub(r.monthly_fee)
    };

    let marker = if inapplicable { "  [не для этой формы]" } else { "" };

    println!(
        "  {} — итого {}/мес{}",
        r.tariff_name,
        format_rub(r.total_cost()),
        marker
    );
    println!(
        "      обслуживание: {monthly}, платежи юр. лицам: {}, вывод на карту: {}, наличные: {}",
        format_rub(r.transfers_to_legal),
        format_rub(r.transfers_to_individuals),
        format_rub(r.cash_handling)
    );
    if let Some(link) = &r.link {
        println!("      открыть счёт: {link}");
    }
}

fn run_estimate(
    bank: BankId,
    inputs: &EstimateInputs,
) -> Result<(), Box<dyn std::error::Error>> {
    let estimator = CoeffEstimator::new(legacy_coeffs());
    let estimate = estimator.estimate(bank, inputs)?;

    println!(
        "Оценка для банка {}: от {} до {} в месяц",
        bank,
        format_rub(estimate.min),
        format_rub(estimate.max)
    );
    println!("Диапазон зависит от тарифов и коэффициентов выбранного банка.");

    Ok(())
}

/// Whole rubles with space-grouped thousands, e.g. `6 099 ₽`.
fn format_rub(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if whole < 0 {
        grouped.insert(0, '-');
    }
    format!("{grouped} ₽")
}

// ── Tests ──────────────────────────────────────────────────────
