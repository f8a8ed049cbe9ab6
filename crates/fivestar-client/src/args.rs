#![doc(hidden)]

use clap::{Parser, Subcommand};

/// Arguments for the `fivestar` CLI
#[derive(Parser, Debug)]
#[command(version, about = "FiveStar Support customer id tool")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[clap(
        short = 'c',
        long,
        global = true,
        value_name = "CLIENT_ID",
        help = "Client identifier [default: $FIVESTAR_CLIENT_ID]"
    )]
    pub client_id: Option<String>,

    #[clap(
        long,
        global = true,
        value_name = "URL",
        help = "Base URL of the FiveStar API \
                [default: $FIVESTAR_API_URL or https://fivestar.support]"
    )]
    pub api_url: Option<String>,

    #[clap(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Don't print any messages except for errors",
        default_value_t = false
    )]
    pub quiet: bool,

    #[clap(
        short = 'v',
        long,
        global = true,
        conflicts_with = "quiet",
        action = clap::ArgAction::Count,
        help = "Output more detail; specify multiple times for more"
    )]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mint customer ids locally for the client
    Generate {
        #[clap(
            short = 'n',
            long,
            value_name = "N",
            help = "Number of customer ids to generate",
            default_value_t = 1
        )]
        count: usize,
    },
    /// Check offline that a customer id belongs to the client
    Verify { customer_id: String },
    /// Show the unmasked payload of a customer id
    Decode { customer_id: String },
    /// Check only the textual format of a customer id
    Check { customer_id: String },
    /// Print the client's public feedback page URL
    Url {
        #[clap(short, long, help = "Locale of the page, e.g. 'fr'")]
        locale: Option<String>,
    },
    /// List the response types configured for the client
    Types,
}
