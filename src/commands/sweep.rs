use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, warn};

use crate::controllers::paste;
use crate::App;

/// Start the periodic expiry sweep, unless it is disabled in the config.
pub fn spawn(app: App) -> Option<JoinHandle<()>> {
    let interval_secs = app.config.sweep.interval_secs;
    if interval_secs == 0 {
        warn!("no sweep interval configured, expired pastes are only dropped on access");
        return None;
    }

    Some(tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(interval_secs));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if let Err(err) = paste::purge_expired(&app.store) {
                error!("failed to purge expired pastes: {err}");
            }
        }
    }))
}
