//! request-snippets CLI entrypoint
//! Parses command-line arguments and renders request snippets through the core library.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use serde_json::Value as JsonValue;
use snippets_core::{available_targets, Config, HarContext, OutputFormat, ParamMap, SnippetBundle};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "request-snippets")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render snippets for a single request
    Generate {
        /// Absolute request URL
        #[arg(long)]
        url: String,
        /// HTTP method
        #[arg(long, default_value = "GET")]
        method: String,
        /// Target identifier such as node_axios or shell_curl (repeatable)
        #[arg(long = "target")]
        targets: Vec<String>,
        /// Request header as 'Name: value' (repeatable)
        #[arg(long = "header")]
        headers: Vec<String>,
        /// Query parameter as name=value (repeatable)
        #[arg(long = "query")]
        query: Vec<String>,
        /// Request body
        #[arg(long)]
        body: Option<String>,
        /// YAML config listing targets and output format
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format, overrides the config file
        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// List the available languages and clients
    Targets,
    /// Render snippets for every request recorded in a HAR file
    Har {
        /// Path to a HAR 1.2 file
        #[arg(long)]
        file: PathBuf,
        /// Target identifier (repeatable)
        #[arg(long = "target")]
        targets: Vec<String>,
        /// YAML config listing targets and output format
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format, overrides the config file
        #[arg(long)]
        format: Option<OutputFormat>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for snippets
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            url,
            method,
            targets,
            headers,
            query,
            body,
            config,
            format,
        } => {
            let config = load_config(config.as_deref()).await?;
            let targets = select_targets(targets, &config)?;
            let format = format.unwrap_or(config.format);

            let headers = parse_headers(headers)?;
            let query = parse_query(query);
            tracing::debug!("Generating {} snippets for {} {}", targets.len(), method, url);

            let bundle = snippets_core::generate(
                url,
                method,
                &targets,
                Some(&query),
                Some(&headers),
                body.as_deref(),
            )
            .with_context(|| format!("Failed to generate snippets for {}", url))?;
            print_bundle(&bundle, format)?;
        }
        Commands::Targets => {
            for target in available_targets() {
                println!("{} ({}), default: {}", target.key, target.title, target.default);
                for client in target.clients {
                    println!("  {}_{}  {}", target.key, client.key, client.title);
                }
            }
        }
        Commands::Har {
            file,
            targets,
            config,
            format,
        } => {
            let config = load_config(config.as_deref()).await?;
            let targets = select_targets(targets, &config)?;
            let format = format.unwrap_or(config.format);

            let har = HarContext::from_file(file)
                .await
                .with_context(|| format!("Failed to load HAR file {}", file.display()))?;
            let requests = har.requests();
            tracing::info!(
                "Rendering {} of {} recorded requests",
                requests.len(),
                har.len()
            );

            for request in requests {
                let bundle = snippets_core::generate(
                    &request.url,
                    &request.method,
                    &targets,
                    Some(&request.query_params),
                    Some(&request.headers),
                    Some(&request.body),
                )
                .with_context(|| {
                    format!("Failed to generate snippets for {} {}", request.method, request.url)
                })?;
                if format == OutputFormat::Text {
                    println!("## {} {}\n", bundle.method, bundle.url);
                }
                print_bundle(&bundle, format)?;
            }
        }
    }
    Ok(())
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Targets named on the command line win over the config file.
fn select_targets(targets: &[String], config: &Config) -> anyhow::Result<Vec<String>> {
    if !targets.is_empty() {
        return Ok(targets.to_vec());
    }
    let specs = config
        .target_specs()
        .context("Invalid target in config file")?;
    if specs.is_empty() {
        anyhow::bail!("No targets given: pass --target or a config file with targets");
    }
    Ok(specs.into_iter().map(|spec| spec.target).collect())
}

fn parse_headers(headers: &[String]) -> anyhow::Result<ParamMap> {
    let mut map = ParamMap::new();
    for header in headers {
        let (name, value) = header
            .split_once(':')
            .with_context(|| format!("Invalid header '{}', expected 'Name: value'", header))?;
        map.insert(
            name.trim().to_string(),
            JsonValue::String(value.trim().to_string()),
        );
    }
    Ok(map)
}

fn parse_query(query: &[String]) -> ParamMap {
    query
        .iter()
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair.as_str(), ""));
            (name.to_string(), JsonValue::String(value.to_string()))
        })
        .collect()
}

fn print_bundle(bundle: &SnippetBundle, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(bundle)
                .context("Failed to serialize snippets")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for snippet in &bundle.snippets {
                println!("# {}\n{}\n", snippet.title, snippet.content);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_headers() -> anyhow::Result<()> {
        let headers = parse_headers(&["Accept: application/json".to_string()])?;
        assert_eq!(headers.get("Accept"), Some(&json!("application/json")));
        assert!(parse_headers(&["broken".to_string()]).is_err());
        Ok(())
    }

    #[test]
    fn test_parse_query() {
        let query = parse_query(&["limit=10".to_string(), "flag".to_string()]);
        assert_eq!(query.get("limit"), Some(&json!("10")));
        assert_eq!(query.get("flag"), Some(&json!("")));
    }

    #[test]
    fn test_command_line_targets_win() -> anyhow::Result<()> {
        let config = Config::new(vec![json!({"target": "python"})]);
        assert_eq!(select_targets(&["shell_curl".to_string()], &config)?, vec!["shell_curl"]);
        assert_eq!(select_targets(&[], &config)?, vec!["python"]);
        assert!(select_targets(&[], &Config::default()).is_err());
        Ok(())
    }
}
