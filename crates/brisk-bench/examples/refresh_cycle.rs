//! Window-list refresh loop, the workload the arena was built for.
//!
//! Each refresh enumerates the (simulated) desktop into the arena and
//! "draws" the sorted list. Between refreshes the arena is reset and the
//! list is rebuilt from scratch; the previous list is never touched again.
//!
//! Run with `RUST_LOG=brisk_arena=debug` to see allocation and growth events.

use brisk_arena::{Arena, ArenaError};
use brisk_bench::{refresh_profile, simulated_desktop, WindowList};
use tracing_subscriber::EnvFilter;

const REFRESHES: u64 = 3;
const WINDOWS: usize = 24;

fn draw(arena: &Arena, list: &WindowList) -> Result<(), ArenaError> {
    for i in 0..list.len() {
        let record = list.record(arena, i);
        let title = String::from_utf8_lossy(list.title(arena, i)?);
        println!("  {:#06x}  {title}", record.handle);
    }
    Ok(())
}

fn main() -> Result<(), ArenaError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut arena = Arena::with_config(refresh_profile())?;
    for refresh in 0..REFRESHES {
        let desktop = simulated_desktop(WINDOWS, refresh);
        let list = WindowList::enumerate(&mut arena, &desktop)?;
        println!(
            "refresh {refresh}: {} windows, {} of {} arena bytes used",
            list.len(),
            arena.used(),
            arena.capacity()
        );
        draw(&arena, &list)?;
        tracing::info!(refresh, generation = arena.generation(), "resetting arena");
        arena.reset();
    }
    Ok(())
}
