//! One-shot `share` command.

use anyhow::{Context, bail};
use skydrop_protocol::{SelectedFile, format_file_size};
use skydrop_session::{SessionController, SubmitOutcome};

use crate::backend::HttpBackend;
use crate::cli::ShareArgs;
use crate::shell::describe_ignore;

pub async fn run(backend: HttpBackend, args: ShareArgs, default_hours: u32) -> anyhow::Result<()> {
    let files = args
        .files
        .iter()
        .map(|path| {
            SelectedFile::from_path(path).with_context(|| format!("cannot share {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let total: u64 = files.iter().filter_map(|f| f.size).sum();

    let ctrl = SessionController::start(backend).await;
    ctrl.select_files(files).await;
    ctrl.set_retention(args.hours.unwrap_or_else(|| default_hours.to_string()))
        .await;

    let summary = ctrl.view().await.selection_summary;
    tracing::info!(files = %summary, size = %format_file_size(total, 2), "sharing");

    match ctrl.submit().await {
        SubmitOutcome::Uploaded {
            download_url,
            expires_at,
            ..
        } => {
            if let Some(msg) = ctrl.message().await {
                eprintln!("{}", msg.text);
            }
            println!("{download_url}");
            if let Some(expires_at) = expires_at {
                println!("expires: {}", expires_at.to_rfc3339());
            }
            if let Some(dest) = args.qr_out {
                ctrl.save_qr(&dest)
                    .await
                    .with_context(|| format!("cannot write QR code to {}", dest.display()))?;
                println!("qr: {}", dest.display());
            }
            Ok(())
        }
        SubmitOutcome::Rejected(e) => bail!("{e}"),
        SubmitOutcome::Failed(e) => {
            let text = ctrl
                .message()
                .await
                .map(|m| m.text)
                .unwrap_or_else(|| e.to_string());
            Err(anyhow::Error::new(e).context(text))
        }
        SubmitOutcome::Ignored(reason) => bail!("{}", describe_ignore(reason)),
    }
}
