//! subdockv CLI
//!
//! Issues sub-document lookups and mutations against a single node.

use clap::{Parser, Subcommand};
use serde_json::Value;
use subdockv::{Client, Config, OperationSpec, RequestOptions};
use tracing_subscriber::{fmt, EnvFilter};

/// subdockv CLI
#[derive(Parser, Debug)]
#[command(name = "subdockv-cli")]
#[command(about = "Sub-document client for a binary key-value node")]
#[command(version)]
struct Args {
    /// Node address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:11210")]
    node: String,

    /// SASL username
    #[arg(short, long, requires = "password")]
    user: Option<String>,

    /// SASL password
    #[arg(short, long, requires = "user")]
    password: Option<String>,

    /// Connections opened up front
    #[arg(long, default_value = "1")]
    pool_min: usize,

    /// Upper bound on open connections
    #[arg(long, default_value = "4")]
    pool_max: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch several paths of a document
    Lookup {
        key: String,

        /// Paths, e.g. `name` or `attributes.hobbies[1].name`
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Set the value at a path, creating parents
    Upsert {
        key: String,
        path: String,

        /// JSON value
        value: String,
    },

    /// Append elements to the array at a path
    ArrayAppend {
        key: String,
        path: String,

        /// JSON values, one per element
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Check the node accepts connections
    Ping,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,subdockv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("subdockv CLI v{}", subdockv::VERSION);
    tracing::info!("Node: {}", args.node);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Config::builder()
        .min_pool_size(args.pool_min)
        .max_pool_size(args.pool_max);
    if let (Some(user), Some(password)) = (args.user, args.password) {
        builder = builder.credentials(user, password);
    }

    let client = Client::connect(args.node, builder.build())?;

    // Dispose before any error propagates
    let output = execute(&client, args.command);
    client.dispose();

    println!("{}", serde_json::to_string_pretty(&output?)?);
    Ok(())
}

fn execute(client: &Client, command: Commands) -> Result<Value, Box<dyn std::error::Error>> {
    let output = match command {
        Commands::Lookup { key, paths } => {
            let specs = paths.into_iter().map(OperationSpec::get).collect();
            let result = client.lookup_in(&key, specs)?;
            for spec in result.specs.iter().filter(|spec| !spec.succeeded()) {
                tracing::warn!("'{}': {:?}", spec.path, spec.status);
            }
            serde_json::json!({
                "cas": result.cas,
                "document": result.projection.into_value(),
            })
        }
        Commands::Upsert { key, path, value } => {
            let spec = OperationSpec::upsert(path, parse_json(&value)?).create_parents();
            let result = client.mutate_in(&key, &spec, RequestOptions::default())?;
            serde_json::json!({ "cas": result.cas })
        }
        Commands::ArrayAppend { key, path, values } => {
            let values = values
                .iter()
                .map(|value| parse_json(value))
                .collect::<Result<Vec<_>, _>>()?;
            let spec = OperationSpec::array_append(path, values);
            let result = client.mutate_in(&key, &spec, RequestOptions::default())?;
            serde_json::json!({ "cas": result.cas })
        }
        Commands::Ping => serde_json::json!({ "connected": client.ping()? }),
    };
    Ok(output)
}

/// Accept bare words as JSON strings
fn parse_json(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(raw).or_else(|_| Ok(Value::String(raw.to_string())))
}
