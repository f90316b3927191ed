//! # Demo: recursive cooperative termination
//!
//! A parent show supervises two internal children. When the session is
//! ended with `pp-exit`, the cascade runs top-down: the player cancels
//! the parent, the parent cancels its children and waits for both before
//! reporting its own completion. The all-shows-ended report only fires
//! once every branch of the tree has confirmed.
//!
//! Run with: `cargo run --example terminate_cascade`

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use showvisor::core::NullHost;
use showvisor::error::{PlayerError, ShowError};
use showvisor::input::{Edge, InputSource, EXIT_SYMBOL};
use showvisor::shows::{
    ShowCatalog, ShowContext, ShowExit, ShowFactory, ShowFn, ShowRecord, ShowRef,
};
use showvisor::subscribers::LogWriter;
use showvisor::{PlayerBuilder, PlayerConfig};

/// An internal child: not a registry show, just a future the parent owns.
async fn child(name: &'static str, cancel: CancellationToken, cleanup: Duration) {
    let mut tick = tokio::time::interval(Duration::from_millis(400));
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                println!("  [{name}] cancelling, cleanup takes {cleanup:?}");
                tokio::time::sleep(cleanup).await;
                println!("  [{name}] done");
                return;
            }
            _ = tick.tick() => println!("  [{name}] working"),
        }
    }
}

/// Parent show: spawns two children, cancels and joins them on termination.
async fn gallery(ctx: ShowContext) -> Result<ShowExit, ShowError> {
    let children = CancellationToken::new();
    let a = tokio::spawn(child("wall-left", children.child_token(), Duration::from_millis(300)));
    let b = tokio::spawn(child("wall-right", children.child_token(), Duration::from_millis(900)));

    ctx.cancelled().await;
    println!("[gallery] terminate requested, cascading to children");
    children.cancel();
    let _ = a.await;
    let _ = b.await;
    println!("[gallery] all children confirmed, reporting completion");
    Ok(ShowExit::Completed)
}

struct CascadeFactory;

impl ShowFactory for CascadeFactory {
    fn build(&self, record: &ShowRecord) -> Result<ShowRef, PlayerError> {
        match record.reference.as_str() {
            "gallery" => Ok(ShowFn::arc("gallery", gallery)),
            "foyer" => Ok(ShowFn::arc("foyer", |ctx: ShowContext| async move {
                ctx.cancelled().await;
                println!("[foyer] terminating immediately");
                Ok(ShowExit::Completed)
            })),
            other => Err(PlayerError::ShowBuild {
                reference: other.to_string(),
                message: "unknown reference".to_string(),
            }),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let catalog = ShowCatalog::from_records(
        "1.2",
        vec![
            ShowRecord::new("start", "start").with_start_show("gallery,foyer"),
            ShowRecord::new("gallery", "mediashow"),
            ShowRecord::new("foyer", "liveshow"),
        ],
    );

    let player = PlayerBuilder::new(PlayerConfig::default(), catalog, Arc::new(CascadeFactory))
        .with_subscribers(vec![Arc::new(LogWriter)])
        .with_host(Arc::new(NullHost))
        .build();

    let port = player.input_port();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1_200)).await;
        port.press(EXIT_SYMBOL, Edge::Rising, InputSource::External);
    });

    player.run().await?;
    println!("cascade complete, session over");
    Ok(())
}
