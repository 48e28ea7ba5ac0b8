use clap;
use env_logger;
use log;

use mqtt_value::{
    output_information, LogSink, OutputConfig, OutputModule, OutputState, RumqttPublisher,
    StateReport, SwitchOutcome,
};

const DEFAULT_UNIQUE_ID: &str = "mqtt-value";

/// Print the registry descriptor of this output
fn print_information() {
    let info = output_information();
    println!("{} ({})", info.output_name, info.output_name_unique);
    println!("{}", info.message);
    println!("Channel options:");
    for option in info.custom_channel_options {
        println!(
            "  {:<10} {:<8} default {:?}: {}",
            option.id,
            format!("{:?}", option.option_type),
            option.default_value,
            option.phrase
        );
    }
}

/// run switches one channel as requested on the command line
fn run(matches: &clap::ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => OutputConfig::from_file(std::path::Path::new(path))?,
        None => OutputConfig::with_defaults(DEFAULT_UNIQUE_ID),
    };
    let channel = *matches.get_one::<usize>("channel").unwrap_or(&0);
    let state: OutputState = matches
        .get_one::<String>("state")
        .map(String::as_str)
        .unwrap_or("off")
        .parse()?;
    let amount = matches.get_one::<f64>("amount").copied();

    let output = OutputModule::new(config, RumqttPublisher, LogSink)?;
    output.setup_output();

    match output.output_switch(state, amount, channel)? {
        SwitchOutcome::Published(measurement) => {
            log::debug!("Published measurement {:?}", measurement);
        }
        SwitchOutcome::Ignored => log::warn!("Nothing published, 'on' needs an amount"),
    }
    if let Some(StateReport::Channel(state)) = output.is_on(Some(channel)) {
        log::info!("Channel #{} state: {:?}", channel, state);
    }
    Ok(())
}

/// START
fn main() {
    // CLI args
    let matches = clap::Command::new("mqtt-value")
        .about("Publish a value to an MQTT topic as an on/off output")
        .arg(
            clap::Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file with the output and its channels"),
        )
        .arg(
            clap::Arg::new("channel")
                .long("channel")
                .default_value("0")
                .value_parser(clap::value_parser!(usize))
                .help("Channel to switch"),
        )
        .arg(
            clap::Arg::new("debug")
                .long("debug")
                .action(clap::ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .arg(
            clap::Arg::new("info")
                .long("info")
                .action(clap::ArgAction::SetTrue)
                .help("Print the output description and exit"),
        )
        .arg(
            clap::Arg::new("state")
                .value_parser(["on", "off"])
                .required_unless_present("info")
                .help("State to switch to"),
        )
        .arg(
            clap::Arg::new("amount")
                .value_parser(clap::value_parser!(f64))
                .allow_negative_numbers(true)
                .help("Value to publish when switching on"),
        )
        .get_matches();

    // log config
    let log_level = match matches.get_flag("debug") {
        true => "debug",
        false => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if matches.get_flag("info") {
        print_information();
        return;
    }

    log::debug!("Start mqtt-value");
    if let Err(e) = run(&matches) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
