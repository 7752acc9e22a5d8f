// src/scrape/pool.rs
use std::{
    sync::{Arc, atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
};

use crate::config::options::pool_size;

/// Run `job` over `items` on at most `workers` threads.
///
/// Workers pull the next index from a shared cursor, so every item is handed
/// out exactly once. Results arrive as `(index, result)` in completion order.
/// The receiver yields one message per item unless a worker panics mid-job;
/// it disconnects once all workers have exited.
pub fn run_pool<I, R, F>(items: Vec<I>, workers: usize, job: F) -> mpsc::Receiver<(usize, R)>
where
    I: Send + Sync + 'static,
    R: Send + 'static,
    F: Fn(&I) -> R + Send + Sync + 'static,
{
    let (res_tx, res_rx) = mpsc::channel::<(usize, R)>();
    if items.is_empty() {
        return res_rx; // sender dropped here: receiver reports disconnect at once
    }

    let workers = pool_size(workers, items.len());
    let items = Arc::new(items);
    let job = Arc::new(job);
    let counter = Arc::new(AtomicUsize::new(0));

    for _ in 0..workers {
        let items = Arc::clone(&items);
        let job = Arc::clone(&job);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= items.len() {
                    break;
                }
                let result = job(&items[i]);
                if tx.send((i, result)).is_err() {
                    break; // collector gone
                }
            }
        });
    }
    drop(res_tx); // collector is sole receiver now

    res_rx
}
