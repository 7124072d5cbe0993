use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use prettytable::{Cell, Row, Table};
use std::sync::Arc;
use tracing::info;

use herald::cache::MemoryCache;
use herald::logging::configure_logging;
use herald::places::DistrictPlaces;
use herald::query::QueryGenerator;
use herald::sources::rss::RssSearchClient;
use herald::sources::{SourceClient, StaticProfiles};
use herald::types::{Chamber, PipelineResult, Subject};
use herald::{NewsConfig, NewsPipeline, TARGET_PIPELINE};

#[derive(Parser)]
#[clap(name = "herald", about = "News aggregation for public officials")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the search terms generated for a subject
    Terms {
        #[clap(flatten)]
        subject: SubjectArgs,
    },

    /// Run the full pipeline against the news search providers
    Fetch {
        #[clap(flatten)]
        subject: SubjectArgs,

        /// Page number, starting at 1
        #[clap(short, long, default_value = "1")]
        page: usize,

        /// Articles per page
        #[clap(short, long, default_value = "10")]
        limit: usize,

        /// Print the result as JSON instead of a table
        #[clap(long)]
        json: bool,
    },
}

#[derive(Args)]
struct SubjectArgs {
    /// First name
    #[clap(long, required = true)]
    first: String,

    /// Last name
    #[clap(long, required = true)]
    last: String,

    /// Two-letter state code
    #[clap(long, required = true)]
    state: String,

    /// senate or house
    #[clap(long, default_value = "house")]
    chamber: Chamber,

    /// Congressional district (House members)
    #[clap(long)]
    district: Option<u32>,

    /// Committee assignments, primary first
    #[clap(long = "committee")]
    committees: Vec<String>,

    /// Subject id; derived from the name when omitted
    #[clap(long)]
    id: Option<String>,
}

impl SubjectArgs {
    fn into_subject(self) -> Subject {
        let id = self.id.unwrap_or_else(|| {
            format!("{}-{}", self.last.to_lowercase(), self.state.to_lowercase())
        });
        let mut subject = Subject::new(
            &id,
            &self.first,
            &self.last,
            &self.state,
            self.chamber,
        )
        .with_committees(self.committees);
        if let Some(district) = self.district {
            subject = subject.with_district(district);
        }
        subject
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();

    let args = Cli::parse();
    let config = NewsConfig::from_env();

    match args.command {
        Commands::Terms { subject } => {
            let subject = subject.into_subject();
            let generator = QueryGenerator::new(&config);
            println!(
                "{} (common name: {})",
                subject.full_name,
                generator.is_common_name(&subject)
            );
            for (rank, term) in generator.generate(&subject).iter().enumerate() {
                println!("{:>3}. {}", rank + 1, term);
            }
        }
        Commands::Fetch {
            subject,
            page,
            limit,
            json,
        } => {
            let subject = subject.into_subject();
            let subject_id = subject.id.clone();
            let providers: Vec<Arc<dyn SourceClient>> =
                RssSearchClient::default_chain(config.request_timeout())?
                    .into_iter()
                    .map(|client| Arc::new(client) as Arc<dyn SourceClient>)
                    .collect();

            let pipeline = NewsPipeline::new(
                Arc::new(StaticProfiles::new(vec![subject])),
                providers,
                Arc::new(MemoryCache::new()),
                DistrictPlaces::from_env(),
                config,
            );

            info!(target: TARGET_PIPELINE, "Fetching page {} (limit {}) for {}", page, limit, subject_id);
            let result = pipeline.get_news(&subject_id, page, limit).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
        }
    }

    Ok(())
}

fn print_result(result: &PipelineResult) {
    println!("{}", result.message);
    if result.articles.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Published"),
        Cell::new("Source"),
        Cell::new("Title"),
        Cell::new("Impact"),
        Cell::new("Tier"),
        Cell::new("Related"),
    ]));

    for article in &result.articles {
        let related = article
            .cluster
            .as_ref()
            .map(|c| format!("{} ({})", c.related_count, c.category))
            .unwrap_or_default();
        table.add_row(Row::new(vec![
            Cell::new(&article.published().format("%Y-%m-%d %H:%M").to_string()),
            Cell::new(article.domain()),
            Cell::new(&article.candidate.title().chars().take(80).collect::<String>()),
            Cell::new(&article.local_impact_score.to_string()),
            Cell::new(&article.relevance_tier.to_string()),
            Cell::new(&related),
        ]));
    }

    table.printstd();
    println!(
        "Page {} of {} ({} articles total{})",
        result.page,
        result.total_pages,
        result.total_count,
        if result.has_next_page { ", more available" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chamber_argument() {
        let cli = Cli::try_parse_from([
            "herald", "terms", "--first", "Jon", "--last", "Ossoff", "--state", "GA", "--chamber",
            "senate",
        ])
        .unwrap();
        let Commands::Terms { subject } = cli.command else {
            panic!("expected terms command");
        };
        assert_eq!(subject.into_subject().chamber, Chamber::Senate);

        assert!(Cli::try_parse_from([
            "herald", "terms", "--first", "Jon", "--last", "Ossoff", "--state", "GA", "--chamber",
            "senat",
        ])
        .is_err());
    }
}
