use std::time::Duration;

use pitchside_core::{MatchStore, SyncHandle, SyncReader, CLOCK_TICK};
use tokio::time::{interval, MissedTickBehavior};

use crate::commands::common::{load_public_match, parse_match_id, scoreboard_line};
use crate::error::CliError;

pub async fn run_watch<S: MatchStore + 'static>(
    store: S,
    id: &str,
    period: Duration,
    once: bool,
) -> Result<(), CliError> {
    let id = parse_match_id(id)?;

    if once {
        store.refresh().await?;
        let view = load_public_match(&store, &id).await?;
        println!("{}", scoreboard_line(&view, view.timer_seconds));
        return Ok(());
    }

    let handle = SyncReader::new(store, id.clone()).with_period(period).spawn();
    let mut updates = handle.subscribe();
    eprintln!("Watching match {id} (Ctrl-C to stop)");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    // first poll runs immediately
    tokio::select! {
        _ = updates.changed() => {}
        _ = &mut ctrl_c => {
            handle.shutdown().await;
            return Ok(());
        }
    }

    let mut display = interval(CLOCK_TICK);
    display.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = display.tick() => println!("{}", watch_line(&handle)),
            _ = &mut ctrl_c => break,
        }
    }

    tracing::debug!(match_id = %id, "Stopping watch");
    handle.shutdown().await;
    Ok(())
}

fn watch_line(handle: &SyncHandle) -> String {
    handle.current().map_or_else(
        || "Match not found".to_string(),
        |view| scoreboard_line(&view, handle.clock().seconds()),
    )
}
