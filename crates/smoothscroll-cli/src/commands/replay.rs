use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use smoothscroll_core::{FileStore, Millis, Settings};
use smoothscroll_engine::{Replayer, Script, ScriptStep, TraceEntry};

pub async fn run(store: &FileStore, path: &Path, realtime: bool, json: bool) -> Result<()> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    let script = Script::parse(&text)?;
    let settings = Settings::load(store).await?;

    info!(
        steps = script.steps.len(),
        duration_ms = script.duration(),
        "Replaying script"
    );

    let trace = if realtime {
        replay_realtime(settings, &script, json).await?
    } else {
        Replayer::run(settings, &script)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
    } else if !realtime {
        for entry in &trace {
            print_entry(entry);
        }
    }

    if !json {
        match trace.last() {
            Some(last) => println!("final scroll_top {} after {} changes", last.scroll_top, trace.len()),
            None => println!("scroll position unchanged"),
        }
    }

    Ok(())
}

/// Step through the script, sleeping through wait steps and printing
/// changes as they happen
async fn replay_realtime(settings: Settings, script: &Script, json: bool) -> Result<Vec<TraceEntry>> {
    let mut replayer = Replayer::new(settings, script.document);
    let mut trace = Vec::new();

    for (index, step) in script.steps.iter().enumerate() {
        if let ScriptStep::Wait { ms } = step {
            // one timer deadline at a time so output keeps pace
            let until = wait_deadline(replayer.now(), *ms);
            while replayer.now() < until {
                let before = replayer.now();
                let next = replayer
                    .plugin()
                    .next_deadline()
                    .map_or(until, |deadline| deadline.min(until));
                tokio::time::sleep(Duration::from_millis(next.saturating_sub(before))).await;
                replayer.wait(next - before);
                flush(&mut replayer, &mut trace, json);
            }
            continue;
        }

        replayer
            .apply(step)
            .with_context(|| format!("Script step {} failed", index + 1))?;
        flush(&mut replayer, &mut trace, json);
    }

    replayer.finish();
    flush(&mut replayer, &mut trace, json);
    Ok(trace)
}

fn wait_deadline(now: Millis, ms: Millis) -> Millis {
    now.saturating_add(ms)
}

fn flush(replayer: &mut Replayer, trace: &mut Vec<TraceEntry>, json: bool) {
    for entry in replayer.drain_trace() {
        if !json {
            print_entry(&entry);
        }
        trace.push(entry);
    }
}

fn print_entry(entry: &TraceEntry) {
    println!("{:>6} ms  scroll_top {:>10.2}", entry.at, entry.scroll_top);
}
