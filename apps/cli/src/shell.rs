//! Interactive `shell` command.
//!
//! Reads one command per line from stdin and forwards it to the session
//! controller. Uploads and deletes run as background tasks so the prompt
//! keeps accepting commands (e.g. `status`) while they are pending.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use skydrop_protocol::{SelectedFile, format_mib};
use skydrop_session::{
    ControlState, IgnoreReason, RevokeOutcome, SessionController, SessionEvent, SubmitOutcome,
    ViewState,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::backend::HttpBackend;

const HELP: &str = "\
commands:
  select <paths...>  replace the selection (no paths clears it)
  drop <paths...>    replace the selection, ignored when empty
  hours <n>          retention period in hours (1-24)
  submit             upload the selection
  delete             delete the uploaded file
  status             show the session state
  help               show this help
  quit               leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Select(Vec<PathBuf>),
    Drop(Vec<PathBuf>),
    Hours(String),
    Submit,
    Delete,
    Status,
    Help,
    Quit,
}

/// Parses a command line. Blank lines yield `Ok(None)`.
fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match cmd.to_ascii_lowercase().as_str() {
        "select" => ShellCommand::Select(rest.iter().map(PathBuf::from).collect()),
        "drop" => ShellCommand::Drop(rest.iter().map(PathBuf::from).collect()),
        "hours" => ShellCommand::Hours(rest.join(" ")),
        "submit" | "upload" => ShellCommand::Submit,
        "delete" | "revoke" => ShellCommand::Delete,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(command))
}

pub(crate) fn describe_ignore(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::ConfigPending => "still loading server limits, try again",
        IgnoreReason::InFlight => "already in progress",
        IgnoreReason::FormHidden => "delete the current file before uploading again",
        IgnoreReason::NoActiveArtifact => "nothing to delete",
    }
}

fn control(state: ControlState) -> &'static str {
    match (state.visible, state.busy, state.enabled) {
        (false, _, _) => "hidden",
        (true, true, _) => "busy",
        (true, false, true) => "ready",
        (true, false, false) => "disabled",
    }
}

/// Renders a view snapshot for `status`.
fn render(view: &ViewState) -> String {
    let mut out = vec![format!("phase:     {}", view.phase.as_str())];

    if view.form_visible {
        out.push(format!("files:     {}", view.selection_summary));
        out.push(format!("retention: {} h", view.retention));
        out.push(match view.max_total_bytes {
            Some(limit) => format!("limit:     {} MB", format_mib(limit)),
            None => "limit:     loading".to_string(),
        });
        out.push(format!("submit:    {}", control(view.submit)));
    }

    if view.result_visible {
        if let Some(url) = &view.download_url {
            out.push(format!("link:      {url}"));
        }
        if let Some(expires_at) = view.expires_at {
            out.push(format!("expires:   {}", expires_at.to_rfc3339()));
        }
        if let Some(path) = &view.qr_path {
            out.push(format!("qr:        {}", path.display()));
        }
        out.push(format!("delete:    {}", control(view.delete)));
    }

    if let Some(msg) = &view.message {
        out.push(format!("message:   [{}] {}", msg.kind.class(), msg.text));
    }
    out.join("\n")
}

fn load_files(paths: &[PathBuf]) -> Result<Vec<SelectedFile>, String> {
    paths
        .iter()
        .map(|p| SelectedFile::from_path(p).map_err(|e| format!("{}: {e}", p.display())))
        .collect()
}

fn print_events(mut events: mpsc::Receiver<SessionEvent>) {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::Message(msg) => println!("[{}] {}", msg.kind.class(), msg.text),
                SessionEvent::LimitsLoaded(limits) => {
                    debug!(max_total_bytes = limits.max_total_bytes, "limits ready");
                }
                SessionEvent::PhaseChanged(phase) => debug!(phase = phase.as_str(), "phase"),
                SessionEvent::MessageCleared | SessionEvent::DeleteListenerAttached => {}
            }
        }
    });
}

fn prompt() {
    print!("skydrop> ");
    let _ = std::io::stdout().flush();
}

pub async fn run(backend: HttpBackend, default_hours: u32) -> anyhow::Result<()> {
    println!("connected to {} (type `help` for commands)", backend.server_url());

    let mut ctrl = SessionController::new(backend);
    if let Some(events) = ctrl.take_events() {
        print_events(events);
    }
    let ctrl = Arc::new(ctrl);
    ctrl.set_retention(default_hours.to_string()).await;

    tokio::spawn({
        let ctrl = Arc::clone(&ctrl);
        async move {
            ctrl.load_config().await;
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                prompt();
                continue;
            }
            Err(e) => {
                println!("{e}");
                prompt();
                continue;
            }
        };

        match command {
            ShellCommand::Select(paths) => match load_files(&paths) {
                Ok(files) => {
                    if !ctrl.select_files(files).await {
                        println!("selection not changed");
                    }
                }
                Err(e) => println!("{e}"),
            },
            ShellCommand::Drop(paths) => match load_files(&paths) {
                Ok(files) => {
                    if !ctrl.drop_files(files).await {
                        println!("drop ignored");
                    }
                }
                Err(e) => println!("{e}"),
            },
            ShellCommand::Hours(raw) => ctrl.set_retention(raw).await,
            ShellCommand::Submit => {
                let ctrl = Arc::clone(&ctrl);
                tokio::spawn(async move {
                    match ctrl.submit().await {
                        SubmitOutcome::Uploaded { download_url, .. } => {
                            println!("link: {download_url}");
                        }
                        SubmitOutcome::Ignored(reason) => println!("{}", describe_ignore(reason)),
                        SubmitOutcome::Rejected(_) | SubmitOutcome::Failed(_) => {}
                    }
                });
            }
            ShellCommand::Delete => {
                let ctrl = Arc::clone(&ctrl);
                tokio::spawn(async move {
                    if let RevokeOutcome::Ignored(reason) = ctrl.revoke().await {
                        println!("{}", describe_ignore(reason));
                    }
                });
            }
            ShellCommand::Status => println!("{}", render(&ctrl.view().await)),
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => break,
        }
        prompt();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skydrop_session::Phase;
    use skydrop_status::{MessageKind, StatusMessage};

    fn idle_view() -> ViewState {
        ViewState {
            phase: Phase::Idle,
            form_visible: true,
            result_visible: false,
            selection_summary: "a.txt and 1 more".into(),
            selected_count: 2,
            retention: "2".into(),
            max_total_bytes: Some(25 * 1024 * 1024),
            artifact_id: None,
            download_url: None,
            qr_path: None,
            expires_at: None,
            submit: ControlState {
                visible: true,
                enabled: true,
                busy: false,
            },
            delete: ControlState {
                visible: false,
                enabled: true,
                busy: false,
            },
            message: None,
        }
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            parse_line("select a.txt b.txt").unwrap(),
            Some(ShellCommand::Select(vec!["a.txt".into(), "b.txt".into()]))
        );
        assert_eq!(parse_line("select").unwrap(), Some(ShellCommand::Select(vec![])));
        assert_eq!(parse_line("drop").unwrap(), Some(ShellCommand::Drop(vec![])));
        assert_eq!(
            parse_line("hours 12").unwrap(),
            Some(ShellCommand::Hours("12".into()))
        );
        assert_eq!(parse_line("SUBMIT").unwrap(), Some(ShellCommand::Submit));
        assert_eq!(parse_line("delete").unwrap(), Some(ShellCommand::Delete));
        assert_eq!(parse_line("status").unwrap(), Some(ShellCommand::Status));
        assert_eq!(parse_line("quit").unwrap(), Some(ShellCommand::Quit));
    }

    #[test]
    fn parse_blank_and_unknown() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert!(parse_line("frobnicate").unwrap_err().contains("frobnicate"));
    }

    #[test]
    fn hours_without_value_is_empty() {
        assert_eq!(parse_line("hours").unwrap(), Some(ShellCommand::Hours(String::new())));
    }

    #[test]
    fn render_form() {
        let text = render(&idle_view());
        assert!(text.contains("phase:     idle"));
        assert!(text.contains("files:     a.txt and 1 more"));
        assert!(text.contains("limit:     25 MB"));
        assert!(text.contains("submit:    ready"));
        assert!(!text.contains("link:"));
    }

    #[test]
    fn render_result_with_message() {
        let view = ViewState {
            phase: Phase::Result,
            form_visible: false,
            result_visible: true,
            download_url: Some("http://share.test/download/abc".into()),
            delete: ControlState {
                visible: true,
                enabled: true,
                busy: false,
            },
            message: Some(StatusMessage {
                id: 3,
                kind: MessageKind::Success,
                text: "File \"a.txt\" uploaded successfully.".into(),
            }),
            ..idle_view()
        };

        let text = render(&view);
        assert!(text.contains("link:      http://share.test/download/abc"));
        assert!(text.contains("delete:    ready"));
        assert!(text.contains("[success] File \"a.txt\" uploaded successfully."));
        assert!(!text.contains("files:"));
    }

    #[test]
    fn control_labels() {
        let busy = ControlState {
            visible: true,
            enabled: false,
            busy: true,
        };
        assert_eq!(control(busy), "busy");
        assert_eq!(
            control(ControlState {
                busy: false,
                ..busy
            }),
            "disabled"
        );
    }

    #[test]
    fn load_files_reports_missing_path() {
        let err = load_files(&[PathBuf::from("/nonexistent/skydrop.bin")]).unwrap_err();
        assert!(err.contains("/nonexistent/skydrop.bin"));
    }
}
