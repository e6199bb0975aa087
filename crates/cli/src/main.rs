use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use anyhow::Context;
use chrono::Utc;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use dispatch_core::{
    BASE_URL, CookieSource, DEFAULT_LLM_MODEL, DEFAULT_OLLAMA_BASE_URL, DEFAULT_READING_RATE, DispatchError,
    RoleMatchers, RunConfig, SanitizeConfig, Session, SessionConfig, SummarizeConfig, Summarizer, WEEKLY_PATH,
    assemble, browser_cookies, copy_stylesheet, edition_from_url, ensure_dir, extract_article,
    list_section_article_urls, recreate_dir, weekly_sections, write_page,
};
use dispatch_core::config::default_user_agent;

mod report;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROJECT_URL: &str = "https://github.com/mikechambers/dispatch";

/// Build a self-contained offline digest of the current Economist weekly edition
#[derive(Parser, Debug)]
#[command(name = "dispatch")]
#[command(about = "Build an offline digest of the Economist weekly edition", long_about = None)]
struct Args {
    /// Print version information and exit
    #[arg(long)]
    version: bool,

    /// Directory the edition output is written beneath
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Browser cookie store used to authenticate (firefox, chrome, edge, opera)
    #[arg(long, default_value = "firefox", value_name = "BROWSER")]
    cookie_source: String,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Words per minute used for read-time estimates
    #[arg(long, default_value_t = DEFAULT_READING_RATE, value_name = "WPM")]
    reading_rate: usize,

    /// Generate per-article summaries with a local LLM
    #[arg(long)]
    create_summary: bool,

    /// Keep going with empty summary fields when the LLM output is malformed
    #[arg(long)]
    ignore_llm_error: bool,

    /// Model name used for summaries
    #[arg(long, default_value = DEFAULT_LLM_MODEL, value_name = "MODEL")]
    llm: String,

    /// Base URL of the Ollama service
    #[arg(long, default_value = DEFAULT_OLLAMA_BASE_URL, value_name = "URL")]
    ollama_base_url: String,

    /// Print progress information while the run executes
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if args.version {
        println!("Dispatch version : {}", VERSION);
        println!("{}", PROJECT_URL);
        return;
    }

    if let Err(e) = run(args) {
        report::print_error(&format!("An error occurred. Aborting : {e}"));
        for cause in e.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Config errors surface before any filesystem or network work starts.
    let cookie_source = CookieSource::from_str(&args.cookie_source)?;

    let Some(output_dir) = args.output_dir else {
        Args::command()
            .error(ErrorKind::MissingRequiredArgument, "--output-dir is required")
            .exit();
    };

    let config = RunConfig {
        output_dir,
        reading_rate: args.reading_rate.max(1),
        verbose: args.verbose,
        user_agent: args.user_agent.unwrap_or_else(default_user_agent),
        cookie_source,
        create_summary: args.create_summary,
        ignore_llm_error: args.ignore_llm_error,
        llm_model: args.llm,
        ollama_base_url: args.ollama_base_url,
    };

    if config.verbose {
        report::print_banner();
    }

    let cookies = browser_cookies(config.cookie_source, &["economist.com", ".economist.com"])
        .context("loading browser cookies")?;

    let session_config = SessionConfig { user_agent: config.user_agent.clone(), ..Default::default() };
    let session = Session::new(&session_config, &cookies)?;

    ensure_dir(&config.output_dir)?;

    if config.verbose {
        report::print_step(1, 4, "Locating the current weekly edition");
    }

    let edition_page = session.get(&format!("{}{}", BASE_URL, WEEKLY_PATH))?;
    let edition = edition_from_url(&edition_page.url)?;

    if config.verbose {
        report::print_info(&edition.display_title);
    }

    let edition_dir = config.output_dir.join(&edition.directory_slug);
    recreate_dir(&edition_dir)?;

    let sections = weekly_sections();
    let mut results = list_section_article_urls(&edition_page.text, &sections)?;

    let matchers = RoleMatchers::default();
    let sanitize_config = SanitizeConfig::default();
    let summarizer = if config.create_summary {
        Some(Summarizer::new(SummarizeConfig {
            base_url: config.ollama_base_url.clone(),
            model: config.llm_model.clone(),
            ..Default::default()
        })?)
    } else {
        None
    };

    if config.verbose {
        report::print_step(2, 4, "Fetching articles");
    }

    for result in &mut results {
        let urls = result.article_urls.clone();
        let total = urls.len();

        for (i, href) in urls.iter().enumerate() {
            let page = session.get(&format!("{}{}", BASE_URL, href))?;

            let mut article = extract_article(&page.text, &result.section, &page.url, &matchers, &sanitize_config)?;
            article.position_in_section = i + 1;
            article.total_in_section = total;

            if let Some(summarizer) = &summarizer
                && result.section.summarize_eligible
            {
                match summarizer.summarize(&article.content) {
                    Ok(summary) => {
                        article.summary = Some(summary.summary);
                        article.relevance = Some(summary.relevance);
                    }
                    Err(e @ DispatchError::Summarize(_)) if config.ignore_llm_error => {
                        report::print_warning(&format!("Could not summarize \"{}\" : {}", article.title, e));
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            if config.verbose {
                report::print_info(&format!("{} : {}", result.section.title, article.title));
            }

            result.articles.push(article);
        }
    }

    if config.verbose {
        report::print_step(3, 4, "Assembling documents");
    }

    let docs = assemble(&edition, &results, &config, Utc::now());

    if config.verbose {
        report::print_step(4, 4, "Writing output");
    }

    write_page(&edition_dir, "index.html", &docs.index)?;
    for rendered in &docs.articles {
        write_page(&edition_dir.join(&rendered.directory), &rendered.file_name, &rendered.html)?;
    }
    write_page(&edition_dir, "podcast.xml", &docs.feed)?;
    copy_stylesheet(&edition_dir)?;

    if config.verbose {
        report::print_success(&format!("Edition written to {}", edition_dir.display()));
    }

    Ok(())
}
