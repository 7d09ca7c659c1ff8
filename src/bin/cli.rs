//! linewire CLI Client
//!
//! Command-line interface for issuing commands to a server speaking the
//! block protocol.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use linewire::{Client, Config, Reply};

/// linewire CLI
#[derive(Parser, Debug)]
#[command(name = "linewire-cli")]
#[command(about = "CLI for key-value stores speaking the block protocol")]
#[command(version)]
struct Args {
    /// Server hostname or IP address
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server TCP port
    #[arg(short, long, default_value = "8888")]
    port: u16,

    /// I/O timeout in milliseconds (0 disables)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Increment the integer value at a key
    Incr {
        /// The key to increment
        key: String,

        /// Amount to add (may be negative)
        #[arg(default_value = "1", allow_hyphen_values = true)]
        delta: i64,
    },

    /// Check whether a key exists
    Exists {
        /// The key to check
        key: String,
    },

    /// Issue an arbitrary command verbatim
    Raw {
        /// Command verb
        verb: String,

        /// Command arguments
        args: Vec<String>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,linewire=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let mut builder = Config::builder().host(&args.host).port(args.port);
    if args.timeout_ms > 0 {
        let timeout = Duration::from_millis(args.timeout_ms);
        builder = builder
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .write_timeout(timeout);
    }

    let mut client = Client::new(builder.build());

    let outcome = match args.command {
        Commands::Get { key } => client.get(&key).map(|value| match value {
            Some(value) => print_bytes(&value),
            None => println!("(nil)"),
        }),
        Commands::Set { key, value } => client.set(&key, &value).map(|_| println!("ok")),
        Commands::Del { key } => client.del(&key).map(|_| println!("ok")),
        Commands::Incr { key, delta } => {
            client.incr(&key, delta).map(|value| println!("{}", value))
        }
        Commands::Exists { key } => client
            .exists(&key)
            .map(|present| println!("{}", if present { "true" } else { "false" })),
        Commands::Raw { verb, args } => client
            .execute(&verb, &args)
            .map(|reply| print_reply(reply)),
    };

    if let Err(err) = outcome {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

fn print_reply(reply: Reply) {
    match reply {
        Reply::Nil => println!("(nil)"),
        Reply::Value(value) => print_bytes(&value),
        Reply::Values(values) => {
            for (idx, value) in values.iter().enumerate() {
                print!("{}) ", idx + 1);
                print_bytes(value);
            }
        }
    }
}

fn print_bytes(bytes: &[u8]) {
    println!("{}", String::from_utf8_lossy(bytes));
}
