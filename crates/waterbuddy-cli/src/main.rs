use std::error::Error;
use std::sync::Arc;

use chrono::Utc;
use log::{error, info};
use tokio::time::{Duration, sleep};

use waterbuddy_core::app::SequencerBuilder;
use waterbuddy_core::config::WaterBuddyConfig;
use waterbuddy_core::domain::{FrameBudget, Rgb, WaterData};
use waterbuddy_core::impls::{ConsoleDevice, FrameAnimationFactory, InMemoryStationStore};
use waterbuddy_core::ports::{DisplayDevice, StationStore};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    // (A) config: optional JSON path as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => WaterBuddyConfig::load(path)?,
        None => WaterBuddyConfig::default(),
    };

    // (B) persisted settings are read before anything is displayed
    let store = InMemoryStationStore::new();
    let station = store.get_station_data().await?;
    let user = store.get_user_data().await?;

    // (C) device + animations + sequencer
    let device: Arc<dyn DisplayDevice> = Arc::new(ConsoleDevice::default());
    let animations = FrameAnimationFactory::with_builtins(Arc::clone(&device), &config.animation);
    let sequencer = SequencerBuilder::new()
        .device(device)
        .animations(Arc::new(animations))
        .build()?;

    // (D) submissions return immediately; the lanes keep them in order
    sequencer.display_message_with_chime(
        format!("Hi {}", user.user_id),
        config.chimes.greeting_for(station.mute),
    )?;
    sequencer.start_animation("spin", FrameBudget::Frames(3), false)?;
    let reminder = sequencer.display_message_with_chime(
        format!("Drink {:.0}ml", station.cup_size_ml),
        config.chimes.reminder_for(station.mute),
    )?;
    let flash = sequencer.flash(Rgb::WATER)?;
    let idle = sequencer.start_animation("pulse", FrameBudget::Unbounded, true)?;
    info!("submitted, counts: {:?}", sequencer.counts());

    reminder.wait().await?;
    store
        .add_water_history(WaterData::new(Utc::now(), station.cup_size_ml))
        .await?;

    // (E) let the idle animation play for a bit, then stop it.
    // stop only reaches an animation that already started, so repeat until it ends.
    flash.wait().await?;
    sleep(Duration::from_millis(500)).await;
    while !idle.is_done() {
        sequencer.stop_animation();
        sleep(Duration::from_millis(50)).await;
    }
    idle.wait().await?;

    sequencer.shutdown().await;
    info!(
        "water history: {} entries, final counts: {:?}",
        store.get_water_history().await?.len(),
        sequencer.counts()
    );
    Ok(())
}
