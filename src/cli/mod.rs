pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "recipebox")]
#[command(about = "Recipebox - store your recipes and import new ones online", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the REST server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Create the recipes table if it does not exist
    Init,

    /// Print every stored recipe
    List,

    /// Search the recipe provider without storing anything
    Search {
        /// Search query
        query: String,
    },

    /// Search the recipe provider and store every result
    Import {
        /// Search query
        query: String,
    },
}
