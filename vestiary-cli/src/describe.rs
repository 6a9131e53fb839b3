use crate::cli::{DescribeArgs, parse_group_override};
use crate::output;
use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use vestiary_batch::{DescriptionRequester, ProgressEvent, ProgressSink};
use vestiary_core::UploadedImage;
use vestiary_model::{OpenAIClient, OpenAIConfig};

pub async fn run(args: DescribeArgs) -> Result<()> {
    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .context("no API key: pass --api-key or set OPENAI_API_KEY")?;

    let overrides = collect_overrides(&args.groups)?;
    let images = load_images(&args.images, &overrides)?;
    if images.is_empty() {
        bail!("no input images");
    }

    let mut config = OpenAIConfig::new(api_key)
        .with_model(args.model.as_str())
        .with_max_tokens(args.max_tokens)
        .with_timeout_secs(args.timeout_secs);
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    let client = OpenAIClient::new(config)?;

    let mut requester = DescriptionRequester::new(Arc::new(client));
    if let Some(instruction) = &args.instruction {
        requester = requester.with_instruction(instruction.as_str());
    }
    if let Some(system) = &args.system {
        let framing = if system.is_empty() { None } else { Some(system.clone()) };
        requester = requester.with_system(framing);
    }

    let results = requester.run_batch_with_progress(images, &LogSink).await;

    output::print_table(&results);
    if let Some(path) = &args.csv {
        output::write_csv(path, &results)?;
        info!(path = %path.display(), "wrote CSV export");
    }

    Ok(())
}

fn collect_overrides(raw: &[String]) -> Result<HashMap<String, String>> {
    let mut overrides = HashMap::new();
    for entry in raw {
        let (file, group) = parse_group_override(entry)?;
        overrides.insert(file, group);
    }
    Ok(overrides)
}

/// Read each input file into an upload. The group is the override for the
/// path as typed or for the bare filename; otherwise the filename stem.
fn load_images(
    paths: &[std::path::PathBuf],
    overrides: &HashMap<String, String>,
) -> Result<Vec<UploadedImage>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no filename", path.display()))?;

        let mut upload = UploadedImage::new(filename.clone(), bytes);
        let typed = path.to_string_lossy();
        if let Some(group) = overrides.get(typed.as_ref()).or_else(|| overrides.get(&filename)) {
            upload = upload.with_group(group.clone());
        }
        images.push(upload);
    }
    Ok(images)
}

struct LogSink;

impl ProgressSink for LogSink {
    fn on_event(&self, event: ProgressEvent) {
        match &event {
            ProgressEvent::BatchStarted { total_groups } => {
                info!(groups = total_groups, "starting batch");
            }
            ProgressEvent::GroupStarted { group_id, index, total_groups } => {
                info!("describing group {:?} ({}/{})", group_id, index + 1, total_groups);
            }
            ProgressEvent::GroupCompleted { result, .. } => {
                let percent = event.fraction_complete().unwrap_or(0.0) * 100.0;
                if result.outcome.is_failed() {
                    info!(group = %result.group_id, "failed ({percent:.0}% of batch done)");
                } else {
                    info!(group = %result.group_id, "described ({percent:.0}% of batch done)");
                }
            }
            ProgressEvent::BatchFinished { described, failed } => {
                info!(described, failed, "batch finished");
            }
        }
    }
}
