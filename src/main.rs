// SPDX-License-Identifier: MPL-2.0
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vitrine::app::config;
use vitrine::app::environment::Environment;
use vitrine::app::paths;
use vitrine::app::preferences::PreferenceState;
use vitrine::app::storage::FileStore;
use vitrine::app::{App, Flags, Message};
use vitrine::content::{ContentSource, ContentStore};
use vitrine::error::Result;
use vitrine::page::Page;

const HELP: &str = "\
vitrine: render the portfolio page

USAGE:
  vitrine [OPTIONS]

OPTIONS:
  --content <PATH|URL>  Content document (default: bundled, or settings.toml)
  --page <FILE>         Page scaffold (default: bundled)
  --lang <CODE>         Switch to this language before writing the page
  --toggle-theme        Flip the stored theme once
  --reduced-motion      Report a reduced-motion preference to the page
  --output <FILE>       Write the page here instead of stdout
  --config-dir <DIR>    Directory holding settings.toml
  --data-dir <DIR>      Directory holding stored preferences
  -h, --help            Print this help
";

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        content: args.opt_value_from_str("--content")?,
        page: args.opt_value_from_str("--page")?,
        output: args.opt_value_from_str("--output")?,
        toggle_theme: args.contains("--toggle-theme"),
        reduced_motion: args.contains("--reduced-motion"),
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unexpected arguments");
    }
    Ok(Some(flags))
}

async fn run(flags: Flags) -> Result<()> {
    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    let (config, warning) = config::load();
    if let Some(warning) = warning {
        tracing::warn!("{warning}");
    }

    let (store, warning) = FileStore::open();
    if let Some(warning) = warning {
        tracing::warn!("{warning}");
    }

    let mut env = Environment::detect();
    env.prefers_reduced_motion |= flags.reduced_motion;

    let page = match flags.page.as_deref() {
        Some(path) => Page::from_file(Path::new(path))?,
        None => Page::bundled()?,
    };
    let source = flags
        .content
        .as_deref()
        .map_or_else(|| config.content_source(), ContentSource::from_location);
    tracing::debug!(%source, "using content source");

    let preferences = PreferenceState::load(Box::new(store), &env);
    let mut app = App::new(page, preferences, ContentStore::new(source), config, &env);
    app.start().await?;

    if let Some(lang) = flags.lang {
        app.update(Message::LanguageSelected(lang))?;
    }
    if flags.toggle_theme {
        app.update(Message::ThemeToggled)?;
    }

    let html = app.to_html();
    match flags.output.as_deref() {
        Some(path) => fs::write(path, html)?,
        None => print!("{html}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            tracing::error!(%err, "invalid arguments");
            eprint!("{HELP}");
            return ExitCode::FAILURE;
        }
    };

    match run(flags).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "failed to render page");
            ExitCode::FAILURE
        }
    }
}
