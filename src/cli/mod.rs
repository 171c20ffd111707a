use crate::{
    config::PlannerConfig,
    core::TripRequest,
    parsing::parse_agent_reply,
    schemas::ValidationMode,
    server,
};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::Read;
use tracing::{error, info};

fn command() -> Command {
    Command::new("itinerary-agent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Trip planning front end for a hosted conversational agent")
        .subcommand_required(true)
        .subcommand(
            Command::new("serve").about("Run the HTTP service").arg(
                Arg::new("bind")
                    .short('b')
                    .long("bind")
                    .value_name("ADDR")
                    .help("Socket address to listen on (or set BIND_ADDR)"),
            ),
        )
        .subcommand(
            Command::new("plan")
                .about("Plan one trip and print the itinerary")
                .arg(
                    Arg::new("location")
                        .short('l')
                        .long("location")
                        .value_name("PLACE")
                        .action(ArgAction::Append)
                        .required(true)
                        .help("Destination; repeat for multi-city trips"),
                )
                .arg(
                    Arg::new("start-date")
                        .short('s')
                        .long("start-date")
                        .value_name("YYYY-MM-DD")
                        .required(true),
                )
                .arg(
                    Arg::new("days")
                        .short('d')
                        .long("days")
                        .value_name("COUNT")
                        .default_value("1"),
                )
                .arg(
                    Arg::new("language")
                        .long("language")
                        .value_name("LANGUAGE")
                        .default_value("English")
                        .help("Language for all text values in the plan"),
                )
                .arg(
                    Arg::new("user")
                        .short('u')
                        .long("user")
                        .value_name("USER_ID"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Extract and translate a saved agent reply without calling the agent")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .default_value("-")
                        .help("Reply transcript, or - for stdin"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Validate against the reply JSON Schema before decoding"),
                ),
        )
}

/// CLI entry point for the itinerary-agent binary
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    match command().get_matches().subcommand() {
        Some(("serve", matches)) => run_serve(matches).await,
        Some(("plan", matches)) => run_plan(matches).await,
        Some(("parse", matches)) => run_parse(matches),
        _ => bail!("unknown subcommand"),
    }
}

async fn run_serve(matches: &ArgMatches) -> anyhow::Result<()> {
    let mut config = PlannerConfig::from_env()?;
    if let Some(bind) = matches.get_one::<String>("bind") {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid --bind address `{bind}`"))?;
    }

    info!(
        project = %config.target.project_id,
        location = %config.target.location,
        agent = %config.target.agent_id,
        "starting itinerary service"
    );

    let planner = config.build_planner()?;
    server::serve(planner, config.bind_addr).await?;
    Ok(())
}

async fn run_plan(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = PlannerConfig::from_env()?;
    let planner = config.build_planner()?;

    let locations: Vec<String> = matches
        .get_many::<String>("location")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let start_raw = matches
        .get_one::<String>("start-date")
        .context("--start-date is required")?;
    let start_date = NaiveDate::parse_from_str(start_raw, "%Y-%m-%d")
        .with_context(|| format!("invalid --start-date `{start_raw}`"))?;
    let days: u32 = matches
        .get_one::<String>("days")
        .map(|raw| raw.parse())
        .transpose()
        .context("--days must be a positive integer")?
        .unwrap_or(1);

    let request = TripRequest {
        locations,
        start_date,
        days,
        language: matches
            .get_one::<String>("language")
            .cloned()
            .unwrap_or_else(|| "English".to_string()),
        user_id: matches.get_one::<String>("user").cloned(),
        session_id: None,
    };

    match planner.plan(&request).await {
        Ok(outcome) => {
            println!("{}\n", outcome.summary());
            println!("{}", serde_json::to_string_pretty(&outcome.itinerary)?);
            Ok(())
        }
        Err(err) => {
            error!(code = err.error_code(), "planning failed: {}", err);
            println!("{}", serde_json::to_string_pretty(&err.to_error_payload())?);
            Err(err.into())
        }
    }
}

fn run_parse(matches: &ArgMatches) -> anyhow::Result<()> {
    let source = matches
        .get_one::<String>("file")
        .map(String::as_str)
        .unwrap_or("-");
    let text = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read reply from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))?
    };

    let mode = if matches.get_flag("strict") {
        ValidationMode::Strict
    } else {
        ValidationMode::Typed
    };

    let parsed = parse_agent_reply(&text, mode)?;
    if !parsed.commentary.trim().is_empty() {
        eprintln!("{}", parsed.commentary.trim());
    }
    println!("{}", serde_json::to_string_pretty(&parsed.itinerary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn plan_accepts_repeated_locations() {
        let matches = command()
            .try_get_matches_from([
                "itinerary-agent",
                "plan",
                "-l",
                "Tokyo",
                "-l",
                "Kyoto",
                "--start-date",
                "2025-09-10",
                "--days",
                "3",
            ])
            .unwrap();
        let (name, plan) = matches.subcommand().unwrap();
        assert_eq!(name, "plan");
        let locations: Vec<&String> = plan.get_many::<String>("location").unwrap().collect();
        assert_eq!(locations, ["Tokyo", "Kyoto"]);
        assert_eq!(plan.get_one::<String>("days").unwrap(), "3");
    }
}
