//! Draw lottery winners from a shared pool.
//!
//! Fills a pool with entries (duplicates allowed: one entry per ticket) and
//! drains it in uniform random draws. Every ticket is drawn exactly once
//! across all rounds, and asking for more tickets than remain is an atomic
//! failure that removes nothing.

use linepool::pool::SharedPool;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pool = SharedPool::new();

    // "alice" bought three tickets; each is a distinct instance in the pool.
    let tickets = ["alice", "alice", "alice", "bob", "carol", "dave", "erin"];
    let loaded = pool.insert(tickets.iter().map(|t| t.to_string()));
    println!("tickets loaded: {loaded}");

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut round = 1;
    while pool.len() >= 2 {
        let winners = pool.sample_with_rng(2, &mut rng)?;
        println!("round {round}: {winners:?} ({} tickets left)", pool.len());
        round += 1;
    }

    // One ticket left: a draw of two fails atomically...
    match pool.sample_with_rng(2, &mut rng) {
        Err(err) => println!("draw of 2 rejected: {err}"),
        Ok(_) => unreachable!("only one ticket remains"),
    }
    // ...and the remaining ticket is still there to be drawn alone.
    let last = pool.sample_with_rng(1, &mut rng)?;
    println!("final draw: {last:?}");

    Ok(())
}
