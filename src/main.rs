use anyhow::Result;
use clap::Parser;
use tool_compare::cli::{Cli, Commands, RequestArgs};
use tool_compare::tools::web_scrape::WebScrapeTool;
use tool_compare::{utils, ComparisonBot, ComparisonRequest, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;
    init_tracing(&settings.logging.level);

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Compare {
        request: RequestArgs::default(),
        max_iterations: None,
    });

    match command {
        Commands::Compare {
            request,
            max_iterations,
        } => handle_compare(settings, request, max_iterations).await,
        Commands::Expand { request } => handle_expand(settings, request).await,
        Commands::Scrape { url } => handle_scrape(settings, url).await,
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_bot(settings: Settings) -> Result<ComparisonBot> {
    let api_key = settings.api_key()?;
    Ok(ComparisonBot::from_settings(settings, api_key))
}

async fn handle_compare(
    settings: Settings,
    args: RequestArgs,
    max_iterations: Option<usize>,
) -> Result<()> {
    let mut request = args.into_request(&settings.comparison);
    let max_iterations = max_iterations.unwrap_or(settings.agent.max_iterations);
    let bot = build_bot(settings)?;

    expand_into(&bot, &mut request).await?;

    utils::print_header("Comparison");
    utils::print_info("Running scraping agent...");

    let result = bot.compare_with_limit(&request, max_iterations).await?;

    for step in &result.steps {
        utils::print_info(&format!("  {} {}", step.tool, step.input));
    }
    if !result.completed {
        utils::print_warning("Agent stopped before producing a final answer");
    }

    println!("\n{}", result.output);
    Ok(())
}

async fn handle_expand(settings: Settings, args: RequestArgs) -> Result<()> {
    let mut request = args.into_request(&settings.comparison);
    let bot = build_bot(settings)?;

    expand_into(&bot, &mut request).await
}

/// Expansion step shared by `compare` and `expand`: print the raw reply and the merged lists
async fn expand_into(bot: &ComparisonBot, request: &mut ComparisonRequest) -> Result<()> {
    utils::print_header(&format!("{} ({})", request.task, request.framework));
    utils::print_info("Requesting objects and comparison parameters...");

    let reply = bot.expand(request).await?;
    utils::print_info(&reply.raw);
    request.apply_expansion(reply.expansion);

    utils::print_list("Objects:", &request.objects);
    utils::print_list("Comparison Parameters:", &request.parameters);
    Ok(())
}

async fn handle_scrape(settings: Settings, url: String) -> Result<()> {
    let tool = WebScrapeTool::from_config(&settings.scrape);

    println!("{}", tool.scrape(&url).await);
    Ok(())
}
