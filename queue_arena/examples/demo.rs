//! Two interleaved queues sharing one arena.
//!
//! Run with `RUST_LOG=queue_arena=trace cargo run --example demo` to watch
//! every placement and shift.

use queue_arena::{PanicHooks, QueueArena, Queues};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("queue_arena=debug".parse()?),
        )
        .init();

    println!("=== Queue Arena Demo ===\n");
    println!(
        "{} bytes, {} queues, {} entry slots\n",
        QueueArena::<2048, 64>::ARENA_BYTES,
        QueueArena::<2048, 64>::MAX_QUEUES,
        QueueArena::<2048, 64>::MAX_ENTRIES,
    );

    let mut queues: Queues<PanicHooks> = Queues::default();

    let a = queues.create_queue();
    queues.enqueue_byte(a, 0);
    queues.enqueue_byte(a, 1);
    let b = queues.create_queue();
    queues.enqueue_byte(b, 3);
    queues.enqueue_byte(a, 2);
    queues.enqueue_byte(b, 4);
    println!("{} {}", queues.dequeue_byte(a), queues.dequeue_byte(a));

    queues.enqueue_byte(a, 5);
    queues.enqueue_byte(b, 6);
    println!("{} {}", queues.dequeue_byte(a), queues.dequeue_byte(a));
    queues.destroy_queue(a);

    println!(
        "{} {} {}",
        queues.dequeue_byte(b),
        queues.dequeue_byte(b),
        queues.dequeue_byte(b)
    );
    queues.destroy_queue(b);

    let (arena, _) = queues.into_inner();
    arena.check_invariants()?;
    println!("\n{:?}", arena);

    Ok(())
}
