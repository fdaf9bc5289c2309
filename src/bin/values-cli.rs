use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use helm_values_builder::values::mapping_from_json;

#[derive(Parser)]
#[command(name = "values-cli")]
#[command(about = "Render and edit Helm values from the command line", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON values file offline
    Render {
        /// JSON file holding the form state
        input: PathBuf,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the current document
    Preview,
    /// Print the current form state as JSON
    Get,
    /// Set a field (value parsed as JSON, otherwise taken as a string)
    Set { path: String, value: String },
    /// Reset a form section (instance, database, kestra, sso, deployment, development, all)
    Reset { section: String },
    /// Save the current document
    Download {
        #[arg(short, long, default_value = "values.yaml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Render { input, output } => {
            let content = tokio::fs::read_to_string(&input).await?;
            let state: Value = serde_json::from_str(&content)?;
            let document = helm_values_builder::serialize(&mapping_from_json(state));
            write_or_print(output, &document).await?;
        }
        Commands::Preview => {
            let res = client.get(format!("{}/api/preview", cli.url)).send().await?;
            println!("{}", text_response(res).await?);
        }
        Commands::Get => {
            let res = client.get(format!("{}/api/values", cli.url)).send().await?;
            print_json(res).await?;
        }
        Commands::Set { path, value } => {
            let res = client
                .post(format!("{}/api/values/update", cli.url))
                .json(&json!({ "path": path, "value": parse_value(&value) }))
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Reset { section } => {
            let res = client
                .post(format!("{}/api/values/reset/{}", cli.url, section))
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Download { output } => {
            let res = client.get(format!("{}/values.yaml", cli.url)).send().await?;
            let text = text_response(res).await?;
            tokio::fs::write(&output, text).await?;
            eprintln!("Saved {}", output.display());
        }
    }

    Ok(())
}

/// `5` → number, `true` → bool, `{"a":1}` → object, `hello` → string.
///
/// A number whose canonical form differs from what was typed (`1.10`, `0.20`,
/// `1e3`) stays a string so tags keep their exact text.
fn parse_value(raw: &str) -> Value {
    match serde_json::from_str(raw) {
        Ok(Value::Number(n)) if n.to_string() != raw => Value::String(raw.to_string()),
        Ok(value) => value,
        Err(_) => Value::String(raw.to_string()),
    }
}

async fn write_or_print(
    output: Option<PathBuf>,
    document: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => tokio::fs::write(&path, document).await?,
        None => println!("{document}"),
    }
    Ok(())
}

async fn text_response(res: reqwest::Response) -> Result<String, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        eprintln!("Response: {}", text);
        std::process::exit(1);
    }
    Ok(text)
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let text = text_response(res).await?;
    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("5"), json!(5));
        assert_eq!(parse_value("false"), json!(false));
        assert_eq!(parse_value("[]"), json!([]));
        assert_eq!(parse_value("reg-secret"), json!("reg-secret"));
        assert_eq!(parse_value("1.25"), json!(1.25));
    }

    #[test]
    fn test_non_canonical_numbers_stay_strings() {
        assert_eq!(parse_value("1.10"), json!("1.10"));
        assert_eq!(parse_value("0.20"), json!("0.20"));
        assert_eq!(parse_value("1e3"), json!("1e3"));
        assert_eq!(parse_value(" 7"), json!(" 7"));

        let values = mapping_from_json(json!({"image": {"tag": parse_value("1.10")}}));
        assert_eq!(
            helm_values_builder::serialize(&values),
            "image:\n  tag: 1.10"
        );
    }
}
