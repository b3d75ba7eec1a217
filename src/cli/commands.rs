use crate::comparison::ComparisonRequest;
use crate::config::ComparisonConfig;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tool-compare")]
#[command(author, version, about = "Compare tools for a task with an LLM and a web-scraping agent", long_about = None)]
pub struct Cli {
    /// Defaults to `compare` with the configured task
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand the seed lists, then run the scraping agent to compare them
    Compare {
        #[command(flatten)]
        request: RequestArgs,

        /// Cap on agent iterations (overrides agent.max_iterations)
        #[arg(long)]
        max_iterations: Option<usize>,
    },

    /// Only ask the model for objects and comparison parameters
    Expand {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Run the web_scrape tool once against a URL
    Scrape { url: String },
}

/// Overrides for the configured comparison inputs
#[derive(Args, Debug, Default, Clone)]
pub struct RequestArgs {
    #[arg(short = 't', long)]
    pub task: Option<String>,

    #[arg(short = 'f', long)]
    pub framework: Option<String>,

    /// Seed object; repeat to pass several (replaces the configured list)
    #[arg(short = 'o', long = "object")]
    pub objects: Vec<String>,

    /// Seed comparison parameter; repeat to pass several
    #[arg(short = 'p', long = "parameter")]
    pub parameters: Vec<String>,
}

impl RequestArgs {
    pub fn into_request(self, defaults: &ComparisonConfig) -> ComparisonRequest {
        let mut request = ComparisonRequest::from_config(defaults);

        if let Some(task) = self.task {
            request.task = task;
        }
        if let Some(framework) = self.framework {
            request.framework = framework;
        }
        if !self.objects.is_empty() {
            request.objects = self.objects;
        }
        if !self.parameters.is_empty() {
            request.parameters = self.parameters;
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["tool-compare"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_compare_overrides() {
        let cli = Cli::try_parse_from([
            "tool-compare",
            "compare",
            "--task",
            "HTTP clients",
            "-f",
            "Rust",
            "-o",
            "reqwest",
            "-o",
            "ureq",
            "--max-iterations",
            "4",
        ])
        .unwrap();

        let Some(Commands::Compare { request, max_iterations }) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(max_iterations, Some(4));

        let request = request.into_request(&ComparisonConfig::default());
        assert_eq!(request.task, "HTTP clients");
        assert_eq!(request.framework, "Rust");
        assert_eq!(request.objects, vec!["reqwest", "ureq"]);
        assert_eq!(request.parameters, vec!["Speed"]);
    }

    #[test]
    fn test_empty_args_keep_defaults() {
        let request = RequestArgs::default().into_request(&ComparisonConfig::default());
        assert_eq!(request, ComparisonRequest::from_config(&ComparisonConfig::default()));
    }

    #[test]
    fn test_scrape_requires_url() {
        assert!(Cli::try_parse_from(["tool-compare", "scrape"]).is_err());
        assert!(Cli::try_parse_from(["tool-compare", "scrape", "https://example.com"]).is_ok());
    }
}
