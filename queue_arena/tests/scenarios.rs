//! End-to-end behaviour of the reference 2 KiB, 64-queue arena.

use queue_arena::{
    IllegalOperation, MAX_ENTRIES, MAX_QUEUES, PanicHooks, QueueArena, QueueError, Queues,
};

type Result<T> = std::result::Result<T, QueueError>;

fn contents(arena: &QueueArena, q: queue_arena::QueueHandle) -> Vec<u8> {
    arena.iter(q).map(|it| it.collect()).unwrap_or_default()
}

#[test]
fn interleaved_queues_keep_fifo_order() -> Result<()> {
    let mut arena: QueueArena = QueueArena::new();
    let q1 = arena.try_create_queue()?;
    arena.try_enqueue_byte(q1, 0)?;
    arena.try_enqueue_byte(q1, 1)?;
    assert_eq!(contents(&arena, q1), [0, 1]);

    let q2 = arena.try_create_queue()?;
    arena.try_enqueue_byte(q2, 3)?;
    assert_eq!(contents(&arena, q2), [3]);

    arena.try_enqueue_byte(q1, 2)?;
    assert_eq!(contents(&arena, q1), [0, 1, 2]);
    arena.try_enqueue_byte(q2, 4)?;
    assert_eq!(contents(&arena, q2), [3, 4]);

    assert_eq!(arena.try_dequeue_byte(q1)?, 0);
    assert_eq!(arena.try_dequeue_byte(q1)?, 1);
    assert_eq!(contents(&arena, q1), [2]);
    assert_eq!(contents(&arena, q2), [3, 4]);
    assert_eq!(arena.check_invariants(), Ok(()));
    Ok(())
}

#[test]
fn filling_every_slot_then_one_more_is_out_of_memory() -> Result<()> {
    let mut arena: QueueArena = QueueArena::new();
    assert_eq!(arena.capacity(), MAX_ENTRIES);
    let q = arena.try_create_queue()?;
    for i in 0..MAX_ENTRIES {
        arena.try_enqueue_byte(q, i as u8)?;
    }
    assert_eq!(arena.len(q)?, MAX_ENTRIES);
    assert_eq!(arena.free_slots(), 0);
    assert_eq!(arena.try_enqueue_byte(q, 0), Err(QueueError::OutOfMemory));
    assert_eq!(arena.check_invariants(), Ok(()));

    for i in 0..MAX_ENTRIES {
        assert_eq!(arena.try_dequeue_byte(q)?, i as u8);
    }
    Ok(())
}

#[test]
#[should_panic(expected = "out of memory")]
fn filling_every_slot_through_hooks_panics() {
    let mut queues: Queues<PanicHooks> = Queues::default();
    let q = queues.create_queue();
    for i in 0..=MAX_ENTRIES {
        queues.enqueue_byte(q, i as u8);
    }
}

#[test]
fn dequeue_from_fresh_queue_is_illegal() -> Result<()> {
    let mut arena: QueueArena = QueueArena::new();
    let q = arena.try_create_queue()?;
    assert_eq!(
        arena.try_dequeue_byte(q),
        Err(QueueError::IllegalOperation(IllegalOperation::EmptyQueue))
    );
    Ok(())
}

#[test]
#[should_panic(expected = "illegal operation")]
fn dequeue_from_fresh_queue_through_hooks_panics() {
    let mut queues: Queues<PanicHooks> = Queues::default();
    let q = queues.create_queue();
    queues.dequeue_byte(q);
}

#[test]
fn enqueue_on_destroyed_queue_is_illegal() -> Result<()> {
    let mut arena: QueueArena = QueueArena::new();
    let q = arena.try_create_queue()?;
    arena.try_enqueue_byte(q, 1)?;
    arena.try_destroy_queue(q)?;
    assert_eq!(
        arena.try_enqueue_byte(q, 2),
        Err(QueueError::IllegalOperation(IllegalOperation::StaleHandle))
    );
    assert_eq!(arena.active_queues(), 0);
    Ok(())
}

#[test]
#[should_panic(expected = "illegal operation")]
fn enqueue_on_destroyed_queue_through_hooks_panics() {
    let mut queues: Queues<PanicHooks> = Queues::default();
    let q = queues.create_queue();
    queues.destroy_queue(q);
    queues.enqueue_byte(q, 2);
}

#[test]
fn growing_into_neighbour_shifts_it_right() -> Result<()> {
    let mut arena: QueueArena = QueueArena::new();
    let q1 = arena.try_create_queue()?;
    arena.try_enqueue_byte(q1, 10)?;
    arena.try_enqueue_byte(q1, 11)?;
    let q2 = arena.try_create_queue()?;
    for v in [20, 21, 22] {
        arena.try_enqueue_byte(q2, v)?;
    }

    let q1_header = arena.header(q1.id()).expect("q1 header");
    let old = arena.header(q2.id()).expect("q2 header");
    let q1_tail = q1_header.base.map(|b| b + q1_header.length);
    assert_eq!(q1_tail, old.base);

    arena.try_enqueue_byte(q1, 12)?;
    let new = arena.header(q2.id()).expect("q2 header");
    assert_eq!(new.base, old.base.map(|b| b + 1));
    assert_eq!(new.length, old.length);
    assert_eq!(contents(&arena, q2), [20, 21, 22]);
    assert_eq!(contents(&arena, q1), [10, 11, 12]);
    assert_eq!(arena.check_invariants(), Ok(()));
    Ok(())
}

#[test]
fn header_table_holds_max_queues() -> Result<()> {
    let mut arena: QueueArena = QueueArena::new();
    let handles = (0..MAX_QUEUES)
        .map(|_| arena.try_create_queue())
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(arena.active_queues(), MAX_QUEUES);
    assert_eq!(
        arena.try_create_queue(),
        Err(QueueError::IllegalOperation(IllegalOperation::NoFreeHeader))
    );

    for (i, &q) in handles.iter().enumerate() {
        arena.try_enqueue_byte(q, i as u8)?;
    }
    arena.try_destroy_queue(handles[7])?;
    let reused = arena.try_create_queue()?;
    assert_eq!(reused.id(), handles[7].id());
    assert_eq!(arena.check_invariants(), Ok(()));
    Ok(())
}

#[test]
fn destroy_returns_slots_to_other_queues() -> Result<()> {
    let mut arena: QueueArena = QueueArena::new();
    let big = arena.try_create_queue()?;
    for _ in 0..MAX_ENTRIES - 1 {
        arena.try_enqueue_byte(big, 0xAA)?;
    }
    let small = arena.try_create_queue()?;
    arena.try_enqueue_byte(small, 1)?;
    assert_eq!(arena.try_enqueue_byte(small, 2), Err(QueueError::OutOfMemory));

    arena.try_destroy_queue(big)?;
    assert_eq!(arena.free_slots(), MAX_ENTRIES - 1);
    for v in 2..100 {
        arena.try_enqueue_byte(small, v)?;
    }
    assert_eq!(contents(&arena, small), (1..100).collect::<Vec<u8>>());
    assert_eq!(arena.check_invariants(), Ok(()));
    Ok(())
}

#[test]
fn creating_on_full_arena_defers_placement() -> Result<()> {
    let mut arena: QueueArena = QueueArena::new();
    let full = arena.try_create_queue()?;
    for _ in 0..MAX_ENTRIES {
        arena.try_enqueue_byte(full, 0)?;
    }
    let late = arena.try_create_queue()?;
    assert_eq!(arena.header(late.id()).and_then(|h| h.base), None);
    assert_eq!(arena.try_enqueue_byte(late, 1), Err(QueueError::OutOfMemory));

    arena.try_dequeue_byte(full)?;
    arena.try_enqueue_byte(late, 1)?;
    assert_eq!(arena.try_dequeue_byte(late)?, 1);
    assert_eq!(arena.check_invariants(), Ok(()));
    Ok(())
}

#[test]
fn arena_bytes_follow_packed_layout() -> Result<()> {
    let mut arena: QueueArena = QueueArena::new();
    let q = arena.try_create_queue()?;
    arena.try_enqueue_byte(q, 0xFF)?;

    let bytes = arena.as_bytes();
    // active counter
    assert_eq!(bytes[0], 1);
    // header 0: valid=1, base=0, length=1, spare=0
    assert_eq!(&bytes[1..4], &[0b1000_0000, 0b0000_0000, 0b0000_0010]);
    // entry 0 starts right after the 64 headers: base=1, valid=1, value=0xFF
    assert_eq!(&bytes[193..195], &[0b1111_1111, 0b1100_0000]);
    Ok(())
}
