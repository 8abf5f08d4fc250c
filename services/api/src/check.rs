use clap::Args;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use stranger_stories::config::AppConfig;
use stranger_stories::error::AppError;
use stranger_stories::workflows::stories::{
    AcceptancePipeline, AcceptanceVerdict, ProfanityFilter, RejectionReason,
};

#[derive(Args, Debug, Default)]
pub(crate) struct CheckArgs {
    /// Story text to evaluate
    #[arg(long, conflicts_with = "file")]
    pub(crate) text: Option<String>,
    /// Read the story from a file instead (`-` reads stdin)
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Use this word list instead of the configured one
    #[arg(long)]
    pub(crate) wordlist: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CheckReport {
    #[serde(flatten)]
    pub(crate) verdict: AcceptanceVerdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
    pub(crate) characters: usize,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs {
        text,
        file,
        wordlist,
    } = args;

    let config = AppConfig::load()?;
    let wordlist = wordlist.or(config.moderation.wordlist_path);
    let words = ProfanityFilter::load(wordlist.as_deref())?;
    let pipeline = AcceptancePipeline::new(Arc::new(words), config.moderation.acceptance)?;

    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) if path.as_os_str() == "-" => read_stdin()?,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => read_stdin()?,
    };

    let report = build_report(&pipeline, &text);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_stdin() -> Result<String, AppError> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

pub(crate) fn build_report(pipeline: &AcceptancePipeline, text: &str) -> CheckReport {
    let verdict = pipeline.evaluate(text);
    CheckReport {
        verdict,
        message: verdict
            .rejection()
            .map(|reason: RejectionReason| pipeline.message_for(reason)),
        characters: text.chars().count(),
    }
}
