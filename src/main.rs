// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scriba CLI entrypoint.
//!
//! Runs the interactive TUI with the assistant worker on a current-thread
//! tokio runtime. The Gemini credential is read from `GEMINI_API_KEY`;
//! without it the UI still works and every assistant call reports the
//! missing key.

use std::error::Error;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use scriba::assist;
use scriba::client::GeminiClient;
use scriba::model::{Document, Persona, Session, Settings};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--demo] [--model <name>] [--base-url <url>] [--persona <name>]\n\n\
         --demo starts with a seeded sample essay instead of an empty document.\n\
         --model overrides the rewrite/answer model name.\n\
         --base-url overrides the API endpoint (testing).\n\
         --persona selects the assistant persona: strict-academic (default), friendly-peer, minimalist-editor.\n\n\
         The API credential is read from GEMINI_API_KEY."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    model: Option<String>,
    base_url: Option<String>,
    persona: Option<Persona>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--model" => {
                if options.model.is_some() {
                    return Err(());
                }
                options.model = Some(args.next().ok_or(())?);
            }
            "--base-url" => {
                if options.base_url.is_some() {
                    return Err(());
                }
                options.base_url = Some(args.next().ok_or(())?);
            }
            "--persona" => {
                if options.persona.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.persona = Some(Persona::from_str(&raw).map_err(|_| ())?);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();

        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "scriba".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let mut client = GeminiClient::from_env();
        if let Some(base_url) = options.base_url {
            client = client.with_base_url(base_url);
        }
        if let Some(model) = options.model {
            client = client.with_flash_model(model);
        }

        let mut settings = Settings::default();
        if let Some(persona) = options.persona {
            settings.persona = persona;
        }
        let session = if options.demo {
            let mut session = scriba::tui::demo_session();
            *session.settings_mut() = settings;
            session
        } else {
            Session::new(Document::new("Untitled", ""), settings)
        };

        let (command_tx, command_rx) = tokio::sync::mpsc::unbounded_channel();
        let (event_tx, event_rx) = std::sync::mpsc::channel();

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let local = tokio::task::LocalSet::new();

        runtime.block_on(local.run_until(async move {
            let worker = tokio::task::spawn_local(assist::worker::run(client, command_rx, event_tx));

            let tui_join = tokio::task::spawn_blocking(move || {
                scriba::tui::run(session, command_tx, event_rx).map_err(|err| err.to_string())
            })
            .await;

            worker.abort();

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::other(err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        }))?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("scriba: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use scriba::model::Persona;

    use super::{parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse_options(["--demo".to_owned()].into_iter()).expect("parse options");
        assert!(options.demo);
        assert!(options.model.is_none());
    }

    #[test]
    fn parses_model_override() {
        let options = parse_options(["--model".to_owned(), "gemini-x".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.model.as_deref(), Some("gemini-x"));
    }

    #[test]
    fn parses_base_url_override() {
        let options =
            parse_options(["--base-url".to_owned(), "http://127.0.0.1:8080".to_owned()].into_iter())
                .expect("parse options");
        assert_eq!(options.base_url.as_deref(), Some("http://127.0.0.1:8080"));
    }

    #[test]
    fn parses_persona_names() {
        let options = parse_options(["--persona".to_owned(), "friendly-peer".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.persona, Some(Persona::FriendlyPeer));
    }

    #[test]
    fn rejects_unknown_persona() {
        parse_options(["--persona".to_owned(), "pirate".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(["--demo".to_owned(), "--demo".to_owned()].into_iter()).unwrap_err();
        parse_options(
            ["--model".to_owned(), "a".to_owned(), "--model".to_owned(), "b".to_owned()]
                .into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_missing_flag_values() {
        parse_options(["--model".to_owned()].into_iter()).unwrap_err();
        parse_options(["--base-url".to_owned()].into_iter()).unwrap_err();
        parse_options(["--persona".to_owned()].into_iter()).unwrap_err();
    }
}
