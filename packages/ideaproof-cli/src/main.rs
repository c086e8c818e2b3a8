use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use ideaproof_client::rpc::RpcLedger;
use ideaproof_client::{
    submit, verify, Content, Error, LedgerClient, MintOptions, Minter, RecordMetadata,
    SubmitRequest, VerifyRequest,
};
use ideaproof_std::FileType;
use indicatif::{ProgressBar, ProgressStyle};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signer::Signer;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod i18n;
mod preferences;
mod render;

use config::{Settings, StorageSettings};
use i18n::{Label, Language};
use preferences::{PreferenceStore, Preferences};

#[derive(Parser, Debug)]
#[command(name = "ideaproof", version, about = "Record and verify proofs of ideas on Solana")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record the fingerprint of some content under your identity
    Submit(SubmitArgs),
    /// Check whether some content has been recorded
    Verify(VerifyArgs),
    /// List the ideas recorded by an identity
    List {
        /// Defaults to the configured keypair
        #[arg(long)]
        owner: Option<Pubkey>,
    },
    /// Print the fingerprint of some content without touching the ledger
    Hash(ContentArgs),
    /// Save the display language
    Lang {
        #[arg(value_enum)]
        language: Language,
    },
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct ContentArgs {
    /// Text to fingerprint
    #[arg(long)]
    text: Option<String>,

    /// File to fingerprint
    #[arg(long)]
    file: Option<PathBuf>,

    /// Precomputed SHA-256 hex digest
    #[arg(long)]
    hash: Option<String>,
}

impl ContentArgs {
    fn into_content(self) -> Content {
        match (self.text, self.file, self.hash) {
            (_, Some(path), _) => Content::File(path),
            (_, _, Some(hash)) => Content::Digest(hash),
            (text, _, _) => Content::Text(text.unwrap_or_default()),
        }
    }
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[command(flatten)]
    content: ContentArgs,

    #[arg(long, default_value_t = FileType::Text)]
    file_type: FileType,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Mint an NFT for the record once it is confirmed
    #[arg(long)]
    nft: bool,

    #[arg(long, requires = "nft")]
    category: Option<String>,

    #[arg(long, requires = "nft")]
    license: Option<String>,

    /// Image attached to the NFT metadata
    #[arg(long, requires = "nft")]
    image: Option<PathBuf>,

    #[command(flatten)]
    storage: StorageSettings,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    #[command(flatten)]
    content: ContentArgs,

    /// Only look for records made by this identity
    #[arg(long, conflicts_with = "mine")]
    owner: Option<Pubkey>,

    /// Only look for records made by the configured keypair
    #[arg(long)]
    mine: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = PreferenceStore::user();
    let language = cli.settings.lang.unwrap_or_else(|| {
        store
            .as_ref()
            .map(|store| store.load().language)
            .unwrap_or_default()
    });

    match run(cli, store.as_ref(), language) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match error.downcast_ref::<Error>() {
                Some(error) => eprintln!("{}", render::error(language, error)),
                None => eprintln!("{error:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, store: Option<&PreferenceStore>, language: Language) -> Result<()> {
    let settings = cli.settings;
    debug!(url = %settings.url, program_id = %settings.program_id, "settings resolved");

    match cli.command {
        Command::Submit(args) => {
            let identity = settings.identity()?;
            let mut client = client(&settings);
            let mut minter = if args.nft {
                args.storage.minter()?
            } else {
                None
            };
            let request = submit_request(args)?;

            let report = with_spinner(language.label(Label::Submitting), || {
                let minter = minter.as_mut().map(|minter| &mut **minter as &mut dyn Minter);
                submit::submit(&mut client, identity.as_ref(), minter, &request)
            })?;
            println!("{}", render::submission(language, &report));
        }
        Command::Verify(args) => {
            let owner = match (args.owner, args.mine) {
                (Some(owner), _) => Some(owner),
                (None, true) => Some(
                    settings
                        .identity()?
                        .ok_or(Error::IdentityRequired)?
                        .pubkey(),
                ),
                (None, false) => None,
            };
            let client = client(&settings);
            let request = VerifyRequest::new(args.content.into_content(), owner);

            let verification = with_spinner(language.label(Label::Verifying), || {
                verify::verify(&client, &request)
            })?;
            println!("{}", render::verification(language, &verification));
        }
        Command::List { owner } => {
            let owner = match owner {
                Some(owner) => owner,
                None => settings
                    .identity()?
                    .ok_or(Error::IdentityRequired)?
                    .pubkey(),
            };
            let client = client(&settings);

            let records = with_spinner(language.label(Label::Listing), || {
                client.records_by_owner(&owner)
            })?;
            println!("{}", render::records(language, &records));
        }
        Command::Hash(args) => {
            let fingerprint = args.into_content().fingerprint()?;
            println!("{}", render::fingerprint(language, &fingerprint));
        }
        Command::Lang { language } => {
            let store = store.ok_or_else(|| anyhow!("no configuration directory available"))?;
            store.save(&Preferences { language })?;
            println!("{}", language.label(Label::LanguageSaved));
        }
    }

    Ok(())
}

fn client(settings: &Settings) -> LedgerClient<RpcLedger> {
    LedgerClient::with_program_id(settings.ledger(), settings.program_id)
}

fn submit_request(args: SubmitArgs) -> Result<SubmitRequest> {
    let mint = if args.nft {
        let image = args
            .image
            .map(|path| {
                fs::read(&path).with_context(|| format!("failed to read image {}", path.display()))
            })
            .transpose()?;

        Some(MintOptions::new(
            args.category.unwrap_or_default(),
            args.license.unwrap_or_default(),
            image,
        ))
    } else {
        None
    };

    Ok(SubmitRequest::new(
        args.content.into_content(),
        RecordMetadata::new(args.file_type, args.title, args.description),
        mint,
    ))
}

fn with_spinner<T>(message: &'static str, operation: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = operation();
    spinner.finish_and_clear();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;

        Cli::command().debug_assert();
    }

    #[test]
    fn content_flags_select_the_content_kind() {
        let cli = Cli::try_parse_from(["ideaproof", "hash", "--file", "idea.txt"]).unwrap();
        let Command::Hash(args) = cli.command else {
            panic!("expected hash");
        };
        assert_eq!(args.into_content(), Content::File(PathBuf::from("idea.txt")));

        assert!(Cli::try_parse_from(["ideaproof", "hash", "--text", "a", "--hash", "b"]).is_err());
    }

    #[test]
    fn no_content_is_empty_text() {
        let cli = Cli::try_parse_from(["ideaproof", "verify"]).unwrap();
        let Command::Verify(args) = cli.command else {
            panic!("expected verify");
        };

        assert_eq!(args.content.into_content(), Content::Text(String::new()));
    }

    #[test]
    fn submit_with_nft_builds_mint_options() {
        let cli = Cli::try_parse_from([
            "ideaproof",
            "submit",
            "--text",
            "an idea",
            "--file-type",
            "code",
            "--nft",
            "--category",
            "Technology",
            "--license",
            "MIT",
        ])
        .unwrap();
        let Command::Submit(args) = cli.command else {
            panic!("expected submit");
        };

        let request = submit_request(args).unwrap();

        assert_eq!(request.metadata.file_type, FileType::Code);
        assert_eq!(
            request.mint,
            Some(MintOptions::new("Technology".into(), "MIT".into(), None))
        );
    }

    #[test]
    fn metadata_dir_requires_public_url() {
        assert!(Cli::try_parse_from([
            "ideaproof",
            "submit",
            "--nft",
            "--metadata-dir",
            "/srv/ideas",
        ])
        .is_err());

        let cli = Cli::try_parse_from([
            "ideaproof",
            "submit",
            "--nft",
            "--metadata-dir",
            "/srv/ideas",
            "--metadata-url",
            "https://ideas.example",
        ])
        .unwrap();
        let Command::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.storage.metadata_dir, Some(PathBuf::from("/srv/ideas")));
    }

    #[test]
    fn category_requires_nft() {
        assert!(
            Cli::try_parse_from(["ideaproof", "submit", "--text", "x", "--category", "Art"])
                .is_err()
        );
    }

    #[test]
    fn global_settings_follow_the_command() {
        let cli = Cli::try_parse_from([
            "ideaproof",
            "list",
            "--url",
            "http://localhost:8899",
            "--commitment",
            "finalized",
            "--lang",
            "zh",
        ])
        .unwrap();

        assert_eq!(cli.settings.url, "http://localhost:8899");
        assert_eq!(cli.settings.commitment, config::Commitment::Finalized);
        assert_eq!(cli.settings.lang, Some(Language::Zh));
    }
}
