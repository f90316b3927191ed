//! # Demo: a minimal exhibit player
//!
//! Wires a two-show profile (a slideshow and a clock) into the player,
//! injects a few symbolic inputs the way keyboard glue would, then ends
//! the session with `pp-exit`.
//!
//! Run with: `cargo run --example player_demo`

use std::sync::Arc;
use std::time::Duration;

use showvisor::core::NullHost;
use showvisor::error::PlayerError;
use showvisor::input::{ClickAreas, KeyboardMap};
use showvisor::shows::{
    ShowCatalog, ShowContext, ShowExit, ShowFactory, ShowFn, ShowRecord, ShowRef,
};
use showvisor::subscribers::LogWriter;
use showvisor::{Controls, PlayerBuilder, PlayerConfig};

struct DemoFactory;

impl ShowFactory for DemoFactory {
    fn build(&self, record: &ShowRecord) -> Result<ShowRef, PlayerError> {
        match record.show_type.as_str() {
            "mediashow" => Ok(ShowFn::arc(record.reference.clone(), slideshow)),
            "liveshow" => Ok(ShowFn::arc(record.reference.clone(), clock)),
            other => Err(PlayerError::ShowBuild {
                reference: record.reference.clone(),
                message: format!("unknown show type: {other}"),
            }),
        }
    }
}

/// Cycles slides on a timer; `slideshow-next` skips ahead.
async fn slideshow(mut ctx: ShowContext) -> Result<ShowExit, showvisor::error::ShowError> {
    let cancel = ctx.cancel_token();
    let mut slide = 0u32;
    let mut dwell = tokio::time::interval(Duration::from_millis(700));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                println!("[slideshow] terminating");
                return Ok(ShowExit::Completed);
            }
            _ = dwell.tick() => {
                slide += 1;
                println!("[slideshow] slide {slide}");
            }
            Some(ev) = ctx.next_input() => {
                match ctx.operation_for(&ev.symbol) {
                    Some("next") => {
                        slide += 1;
                        println!("[slideshow] skip to slide {slide}");
                    }
                    _ => {} // not ours
                }
            }
        }
    }
}

/// Prints a tick twice a second until terminated.
async fn clock(ctx: ShowContext) -> Result<ShowExit, showvisor::error::ShowError> {
    let mut tick = tokio::time::interval(Duration::from_millis(500));
    loop {
        tokio::select! {
            _ = ctx.cancelled() => {
                println!("[clock] terminating");
                return Ok(ShowExit::Completed);
            }
            _ = tick.tick() => println!("[clock] tick"),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let catalog = ShowCatalog::from_records(
        "1.2",
        vec![
            ShowRecord::new("start", "start").with_start_show("slideshow,clock"),
            ShowRecord::new("slideshow", "mediashow"),
            ShowRecord::new("clock", "liveshow"),
        ],
    );
    let controls = Controls::parse("[controls]\nslideshow-next = next\n");

    let player = PlayerBuilder::new(PlayerConfig::default(), catalog, Arc::new(DemoFactory))
        .with_controls(controls)
        .with_subscribers(vec![Arc::new(LogWriter)])
        .with_host(Arc::new(NullHost))
        .build();

    // stand-in for the windowing glue: key presses and a screen tap
    let keys = KeyboardMap::parse("[keys]\nRight = slideshow-next\nEscape = pp-exit\n");
    let areas = ClickAreas::parse(
        "[next]\nx1 = 0\ny1 = 0\nx2 = 200\ny2 = 200\nsymbol = slideshow-next\n",
    );
    let port = player.input_port();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1_200)).await;
        keys.press(&port, "Right");
        tokio::time::sleep(Duration::from_millis(800)).await;
        areas.click(&port, 120, 40);
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        keys.press(&port, "Escape");
    });

    player.run().await?;
    println!("session over");
    Ok(())
}
