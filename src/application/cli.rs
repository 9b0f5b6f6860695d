use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::is_chat_model;
use crate::domain::models::select_stage;
use crate::domain::models::total_turns;
use crate::domain::models::BackendName;
use crate::infrastructure::backends::BackendManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn print_models() -> Result<()> {
    let backend_name = Config::get(ConfigKey::Backend);
    let backend = match BackendName::parse(backend_name.to_string()) {
        Some(name) => BackendManager::get(name)?,
        None => bail!(format!("Unknown backend '{backend_name}'")),
    };

    backend.health_check().await?;
    let models = backend.list_models().await?;

    let (chat, other): (Vec<String>, Vec<String>) = models
        .into_iter()
        .partition(|model| return is_chat_model(model));

    println!("{}", Paint::new("CHAT MODELS").bold());
    for model in chat {
        println!("- {model}");
    }

    if !other.is_empty() {
        println!("\n{}", Paint::new("OTHER MODELS").bold());
        for model in other {
            println!("- {model}");
        }
    }

    return Ok(());
}

fn print_stages() {
    for turn in 0..=total_turns() {
        let plan = select_stage(turn);
        if plan.is_concluded() {
            println!("{turn:>2}+ {}", plan.stage);
            break;
        }
        println!("{turn:>2}  {}", plan.stage);
    }
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for the interview server")
        .hide(true)
        .subcommand(
            Command::new("stages").about("Print which interview stage each turn falls into.")
        )
        .subcommand(
            Command::new("log-path").about("Output path to the JSON log file written when MOCKINTERVIEW_LOG_DIR is set.")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn env_name(key: ConfigKey) -> String {
    return format!(
        "MOCKINTERVIEW_{}",
        key.to_string().to_uppercase().replace('-', "_")
    );
}

fn config_arg(key: ConfigKey, help: &str) -> Arg {
    let mut help = help.to_string();
    let default = Config::default(key);
    if !default.is_empty() {
        help = format!("{help} [default: {default}]");
    }

    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(env_name(key))
        .num_args(1)
        .help(help)
        .global(true);
}

fn config_args() -> Vec<Arg> {
    return vec![
        config_arg(
            ConfigKey::Backend,
            "The backend hosting the models used for interviews.",
        )
        .short('b')
        .value_parser(PossibleValuesParser::new(BackendName::VARIANTS)),
        config_arg(
            ConfigKey::BackendHealthCheckTimeout,
            "Time to wait in milliseconds before timing out when doing a healthcheck for a backend.",
        ),
        config_arg(ConfigKey::ConfigFile, "Path to configuration file.").short('c'),
        config_arg(
            ConfigKey::FeedbackModel,
            "The model used to grade finished interviews.",
        ),
        config_arg(
            ConfigKey::GroqToken,
            "Groq API token when using the Groq backend. GROQ_API_KEY is read as well.",
        ),
        config_arg(
            ConfigKey::GroqURL,
            "Groq API URL when using the Groq backend. Can be swapped to a compatible proxy.",
        ),
        config_arg(ConfigKey::Host, "Address the HTTP server binds to."),
        config_arg(
            ConfigKey::InterviewRole,
            "The job title the interviewer hires for.",
        ),
        config_arg(
            ConfigKey::MaxUploadBytes,
            "Largest request body accepted, including resume and audio uploads.",
        ),
        config_arg(
            ConfigKey::Model,
            "The model on the backend that conducts the interview.",
        )
        .short('m'),
        config_arg(
            ConfigKey::OpenaiToken,
            "OpenAI API token when using the OpenAI backend.",
        ),
        config_arg(
            ConfigKey::OpenaiURL,
            "OpenAI API URL when using the OpenAI backend. Can be swapped to a compatible proxy.",
        ),
        config_arg(ConfigKey::Port, "Port the HTTP server listens on.").short('p'),
        config_arg(
            ConfigKey::RequestTimeout,
            "Time to wait in milliseconds for any single backend request.",
        ),
        config_arg(
            ConfigKey::ResumeMaxChars,
            "Truncates resume text placed in prompts to this many characters. 0 disables truncation.",
        ),
        config_arg(
            ConfigKey::Temperature,
            "Sampling temperature for interviewer replies.",
        ),
        config_arg(
            ConfigKey::TranscriptionLanguage,
            "Language hint sent with audio for transcription.",
        ),
        config_arg(
            ConfigKey::TranscriptionModel,
            "The model used to transcribe recorded answers.",
        ),
    ];
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("mockinterview")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(Command::new("serve").about("Start the interview HTTP server. This is the default."))
        .subcommand(Command::new("models").about("List the models available on the configured backend."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .args(config_args());
}

/// Parses the command line and runs any one-shot subcommand. Returns true when
/// the server should be started.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("stages", _)) => {
                    print_stages();
                }
                Some(("log-path", _)) => match env::var("MOCKINTERVIEW_LOG_DIR") {
                    Ok(dir) => {
                        let log_path = path::PathBuf::from(dir).join("server.log");
                        println!("{}", log_path.to_string_lossy());
                    }
                    Err(_) => {
                        println!("MOCKINTERVIEW_LOG_DIR is not set, logs are only written to stdout.");
                    }
                },
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("serve", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("models", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_models().await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
