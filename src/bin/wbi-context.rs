use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use wbi_context::config::{COUNTRY_CODE, DEFAULT_BASE_URL, DEFAULT_LOCALE};
use wbi_context::context::ContextReport;
use wbi_context::insights::MarketInsights;
use wbi_context::{
    Client, Context, ContextConfig, CountryProfile, FetchPolicy, IndicatorSource, StaticSource,
    context, get_context, storage,
};

#[derive(Parser, Debug)]
#[command(
    name = "wbi-context",
    version,
    about = "Latest GDP, inflation & population for a country, from the World Bank"
)]
struct Cli {
    /// Country code (ISO2 or ISO3)
    #[arg(short, long, default_value = COUNTRY_CODE)]
    country: String,
    /// Locale for number formatting (en, pt, de, fr, es)
    #[arg(short, long, default_value = DEFAULT_LOCALE)]
    locale: String,
    /// World Bank API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Keep indicators that could be fetched even if another lookup fails.
    #[arg(long, default_value_t = false)]
    partial: bool,
    /// Read payloads from a JSON file (`{"<indicator>": {"data": {...}}}`) instead of the API.
    #[arg(long)]
    offline: Option<PathBuf>,
    /// Print the country profile and context as JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Also print market insights.
    #[arg(long, default_value_t = false)]
    insights: bool,
    /// Save the context to a file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format for --out (csv or json). If omitted, inferred from the extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether any indicator made it into the context.
fn run(cli: Cli) -> Result<bool> {
    let config = ContextConfig {
        country: cli.country.clone(),
        locale: cli.locale.clone(),
        policy: if cli.partial {
            FetchPolicy::Partial
        } else {
            FetchPolicy::AllOrNothing
        },
    };
    config.validate()?;
    let profile = CountryProfile::for_code(&config.country);

    let source: Box<dyn IndicatorSource> = match &cli.offline {
        Some(path) => Box::new(StaticSource::from_json_file(path)?),
        None => Box::new(Client::new(cli.base_url.as_str())?),
    };

    let ctx = match get_context(source.as_ref(), &config) {
        Some(ctx) if !ctx.is_empty() => ctx,
        _ => {
            println!("Could not retrieve data for {}", profile.name);
            return Ok(false);
        }
    };

    if let Some(path) = cli.out.as_ref() {
        save(&ctx, path, cli.format.as_ref())?;
        eprintln!("Saved {} indicators to {}", ctx.len(), path.display());
    }

    let insights = cli
        .insights
        .then(|| MarketInsights::from_context(&ctx, &profile));

    if cli.json {
        let report = ContextReport {
            profile: &profile,
            context: &ctx,
            insights: insights.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} context:", profile.name);
        for line in context::render_lines(&ctx) {
            println!("{}", line);
        }
        if let Some(i) = &insights {
            println!();
            println!("Market insights:");
            for line in i.render_lines() {
                println!("{}", line);
            }
            if let Some(eco) = &profile.economic_context {
                println!("main sectors: {}", eco.main_sectors.join(", "));
                println!("challenges: {}", eco.challenges.join(", "));
                println!("opportunities: {}", eco.opportunities.join(", "));
            }
        }
    }

    Ok(true)
}

fn save(ctx: &Context, path: &Path, format: Option<&OutFormat>) -> Result<()> {
    let fmt = match format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(ctx, path),
        "json" => storage::save_json(ctx, path),
        other => anyhow::bail!("unsupported format: {}", other),
    }
}
