//! Integration test: the build / use / reset / rebuild cycle.
//!
//! Mirrors how a refresh loop drives the arena: every cycle builds a fresh
//! array of records, reads it back, then resets. Containers from an earlier
//! cycle must be rejected rather than read through.

use brisk_arena::{Arena, ArenaArray, ArenaError, Pod, Zeroable};

#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Entry {
    id: u64,
    weight: f32,
    flags: u32,
}

fn build(arena: &mut Arena, cycle: u64, count: u64) -> Result<ArenaArray<Entry>, ArenaError> {
    let mut entries = ArenaArray::new();
    for i in 0..count {
        entries.push(
            Entry {
                id: cycle * 1000 + i,
                weight: i as f32 * 0.5,
                flags: (i % 3) as u32,
            },
            arena,
        )?;
    }
    Ok(entries)
}

#[test]
fn repeated_cycles_reuse_the_same_space() {
    let mut arena = Arena::new(16 * 1024);
    let mut high_water = None;

    for cycle in 0..50 {
        let entries = build(&mut arena, cycle, 100).unwrap();
        assert_eq!(entries.len(), 100);
        let first = entries.at(&arena, 0);
        assert_eq!(first.id, cycle * 1000);
        let last = entries.at(&arena, 99);
        assert_eq!(last.weight, 49.5);

        // Identical workloads land at identical offsets every cycle.
        let used = arena.used();
        assert_eq!(*high_water.get_or_insert(used), used);
        arena.reset();
    }
}

#[test]
fn previous_cycle_container_is_rejected() {
    let mut arena = Arena::new(4096);
    let mut old = build(&mut arena, 0, 10).unwrap();
    arena.reset();
    let fresh = build(&mut arena, 1, 10).unwrap();

    assert!(matches!(
        old.as_slice(&arena),
        Err(ArenaError::StaleHandle { .. })
    ));
    let push = old.push(Entry::zeroed(), &mut arena);
    assert!(matches!(push, Err(ArenaError::StaleHandle { .. })));

    // The rebuilt container is unaffected by the rejected access.
    assert_eq!(fresh.as_slice(&arena).unwrap()[9].id, 1009);
}

#[test]
fn arrays_from_one_arena_cannot_grow_in_another() {
    let mut a = Arena::new(1024);
    let mut b = Arena::new(1024);
    let mut entries = build(&mut a, 0, 2).unwrap();
    let result = entries.push(Entry::zeroed(), &mut b);
    assert!(matches!(result, Err(ArenaError::ForeignHandle { .. })));
    assert_eq!(b.used(), 0);
    assert_eq!(entries.len(), 2);
}

#[test]
fn exhausted_cycle_recovers_after_reset() {
    // 1 KiB holds every doubling of a 20-entry build (1008 bytes) but not
    // of a 100-entry one.
    let mut arena = Arena::new(1024);
    let err = build(&mut arena, 0, 100).unwrap_err();
    assert!(matches!(err, ArenaError::CapacityExceeded { .. }));

    arena.reset();
    let entries = build(&mut arena, 1, 20).unwrap();
    assert_eq!(entries.len(), 20);
}

#[test]
fn several_arrays_interleave_in_one_arena() {
    let mut arena = Arena::new(8 * 1024);
    let mut ids = ArenaArray::new();
    let mut names = ArenaArray::new();
    for (i, name) in ["alpha", "beta", "gamma", "delta"].iter().enumerate() {
        ids.push(i as u32, &mut arena).unwrap();
        names.extend_from_slice(name.as_bytes(), &mut arena).unwrap();
    }
    assert_eq!(ids.as_slice(&arena).unwrap(), &[0, 1, 2, 3]);
    assert_eq!(names.as_slice(&arena).unwrap(), b"alphabetagammadelta");
}
