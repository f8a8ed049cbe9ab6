#![doc(hidden)]

//! Command execution for the `fivestar` binary, kept apart from `main` so it can be driven
//! with a scripted transport and captured output.

use std::io::Write;

use data_encoding::HEXLOWER;
use fivestar_customer_id::{base32, decode_payload, is_valid_format};
use jiff::Timestamp;
use tracing::{debug, info};

use crate::args::{Args, Command};
use crate::config::{FIVESTAR_API_URL, FIVESTAR_CLIENT_ID};
use crate::{ClientConfig, ClientError, FiveStarClient};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("writing output: {0}")]
    Io(#[from] std::io::Error),
}

/// Exit status: 0 on success, 1 when a customer id was rejected, 2 on error.
pub fn exit_code(result: &Result<bool, CliError>) -> i32 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

/// Run `args` against the real service, reading configuration through `env`.
///
/// Returns `Ok(false)` when a check ran but the customer id was rejected.
pub fn run<F, W>(args: &Args, env: F, out: &mut W) -> Result<bool, CliError>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    // The format check needs no client
    if let Command::Check { customer_id } = &args.command {
        return check(customer_id, out);
    }

    let client = FiveStarClient::new(load_config(args, env)?);
    execute(&args.command, &client, out)
}

/// Command line flags take precedence over `FIVESTAR_*` variables from `env`.
pub fn load_config<F>(args: &Args, env: F) -> Result<ClientConfig, ClientError>
where
    F: Fn(&str) -> Option<String>,
{
    ClientConfig::from_lookup(|name| match name {
        FIVESTAR_CLIENT_ID if args.client_id.is_some() => args.client_id.clone(),
        FIVESTAR_API_URL if args.api_url.is_some() => args.api_url.clone(),
        _ => env(name),
    })
}

pub fn execute<W: Write>(
    command: &Command,
    client: &FiveStarClient,
    out: &mut W,
) -> Result<bool, CliError> {
    match command {
        Command::Generate { count } => {
            for _ in 0..*count {
                writeln!(out, "{}", client.generate_local_customer_id()?)?;
            }
            info!("generated {} customer id(s) for '{}'", count, client.client_id());
            Ok(true)
        }
        Command::Verify { customer_id } => {
            let valid = client.verify_local_customer_id(customer_id);
            writeln!(out, "{}", if valid { "valid" } else { "invalid" })?;
            Ok(valid)
        }
        Command::Decode { customer_id } => display_payload(client, customer_id, out),
        Command::Check { customer_id } => check(customer_id, out),
        Command::Url { locale } => {
            writeln!(out, "{}", client.public_url(locale.as_deref()))?;
            Ok(true)
        }
        Command::Types => {
            for response_type in client.get_response_types()? {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    response_type.id, response_type.slug, response_type.name
                )?;
            }
            Ok(true)
        }
    }
}

fn check<W: Write>(customer_id: &str, out: &mut W) -> Result<bool, CliError> {
    let valid = is_valid_format(customer_id);
    writeln!(out, "{}", if valid { "valid format" } else { "invalid format" })?;
    Ok(valid)
}

fn display_payload<W: Write>(
    client: &FiveStarClient,
    customer_id: &str,
    out: &mut W,
) -> Result<bool, CliError> {
    let Some(payload) = decode_payload(customer_id, client.client_id()) else {
        writeln!(out, "invalid")?;
        return Ok(false);
    };

    let millis = payload.timestamp_millis();

    writeln!(out, "canonical: {}", base32::encode(payload.as_bytes()))?;
    // 48 bits of milliseconds reach past the year 9999, which jiff does not represent
    match Timestamp::from_millisecond(millis as i64) {
        Ok(timestamp) => writeln!(out, "created:   {timestamp}")?,
        Err(e) => {
            debug!("timestamp {millis} not representable: {e}");
            writeln!(out, "created:   {millis} ms after the Unix epoch")?
        }
    }
    writeln!(out, "entropy:   {}", HEXLOWER.encode(&payload.entropy()))?;
    Ok(true)
}
