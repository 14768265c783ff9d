use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tessara_channel::{Sender, bounded, select, tick};
use tessara_logger::info;

use crate::pool::TxPool;

/// Owns the background thread that expires stale transactions.
///
/// The thread wakes at the configured cleanup interval, runs
/// [`TxPool::cleanup`], and exits when [`stop`] signals it. Dropping the
/// service without calling [`stop`] leaves the thread running, as the
/// thread keeps its own handle on the pool; lifecycle is explicit by
/// design.
///
/// [`stop`]: TxPoolService::stop
pub struct TxPoolService {
    pool: Arc<TxPool>,
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

impl TxPoolService {
    /// Spawn the cleaner for `pool`.
    pub fn start(pool: Arc<TxPool>) -> TxPoolService {
        let interval = pool.config().cleanup_interval();
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let worker = Arc::clone(&pool);
        let thread = thread::Builder::new()
            .name("tx_pool_cleaner".into())
            .spawn(move || {
                let ticker = tick(interval);
                loop {
                    select! {
                        recv(ticker) -> _ => {
                            worker.cleanup();
                        },
                        recv(stop_rx) -> _ => break,
                    }
                }
            })
            .expect("spawn tx_pool_cleaner thread");
        info!(
            "tx-pool cleaner started interval_secs={}",
            interval.as_secs()
        );
        TxPoolService {
            pool,
            stop_tx,
            thread,
        }
    }

    /// The pool this service maintains.
    pub fn pool(&self) -> &Arc<TxPool> {
        &self.pool
    }

    /// Signal the cleaner and join it.
    pub fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.thread.join();
        info!("tx-pool cleaner stopped");
    }
}
