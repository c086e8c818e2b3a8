//! Terminal output. Everything here returns strings so the caller decides
//! where they go.

use console::{style, Emoji};
use ideaproof_client::{Error, IdeaSnapshot, MintOutcome, SubmissionReport, Verification};

use crate::i18n::{Label, Language};

static SPARKLES: Emoji<'_, '_> = Emoji("✨ ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");

fn field(language: Language, label: Label, value: impl std::fmt::Display) -> String {
    format!("  {} {}", style(format!("{}:", language.label(label))).bold().green(), value)
}

fn snapshot_fields(language: Language, snapshot: &IdeaSnapshot) -> Vec<String> {
    let recorded_at = snapshot
        .recorded_at()
        .map_or_else(|| snapshot.timestamp.to_string(), |at| at.to_rfc3339());
    let mut lines = vec![
        field(language, Label::Fingerprint, &snapshot.fingerprint),
        field(language, Label::Owner, snapshot.owner),
        field(language, Label::RecordedAt, recorded_at),
        field(language, Label::FileType, snapshot.file_type),
        field(language, Label::Locator, snapshot.address),
    ];
    if let Some(title) = &snapshot.title {
        lines.push(field(language, Label::Title, title));
    }
    if let Some(description) = &snapshot.description {
        lines.push(field(language, Label::Description, description));
    }

    lines
}

pub fn submission(language: Language, report: &SubmissionReport) -> String {
    let mut lines = vec![
        format!("{}{}", SPARKLES, style(language.label(Label::Recorded)).cyan().bold()),
        field(language, Label::Fingerprint, &report.fingerprint),
        field(language, Label::Locator, report.receipt.locator),
        field(language, Label::Signature, report.receipt.signature),
        field(language, Label::SubmittedAt, report.submitted_at.to_rfc3339()),
    ];

    match &report.mint {
        MintOutcome::NotRequested => {}
        MintOutcome::Minted(receipt) => {
            lines.push(format!(
                "{}{}",
                SPARKLES,
                style(language.label(Label::Minted)).cyan().bold()
            ));
            lines.push(field(language, Label::MintAddress, receipt.mint_address));
            lines.push(field(language, Label::TokenAccount, receipt.token_account));
            lines.push(field(language, Label::MetadataUri, &receipt.metadata_uri));
        }
        MintOutcome::Failed(error) => lines.push(format!(
            "{}{}: {}",
            WARNING,
            style(language.label(Label::MintFailed)).yellow().bold(),
            language.mint_error(error)
        )),
    }

    lines.join("\n")
}

pub fn verification(language: Language, verification: &Verification) -> String {
    match verification {
        Verification::NotFound => format!(
            "{}{}",
            SEARCH,
            style(language.label(Label::NotFound)).yellow().bold()
        ),
        Verification::Found(snapshot) => {
            let mut lines = vec![format!(
                "{}{}",
                SPARKLES,
                style(language.label(Label::Found)).cyan().bold()
            )];
            lines.extend(snapshot_fields(language, snapshot));
            lines.join("\n")
        }
    }
}

pub fn records(language: Language, snapshots: &[IdeaSnapshot]) -> String {
    if snapshots.is_empty() {
        return format!(
            "{}{}",
            SEARCH,
            style(language.label(Label::NoRecords)).yellow().bold()
        );
    }

    snapshots
        .iter()
        .enumerate()
        .map(|(index, snapshot)| {
            let mut lines = vec![style(format!("#{}", index + 1)).bold().to_string()];
            lines.extend(snapshot_fields(language, snapshot));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn fingerprint(language: Language, fingerprint: &str) -> String {
    field(language, Label::Fingerprint, fingerprint)
}

pub fn error(language: Language, error: &Error) -> String {
    format!("{}{}", CROSS, style(language.error(error)).red().bold())
}
