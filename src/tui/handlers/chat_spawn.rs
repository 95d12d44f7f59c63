//! Spawns webhook requests in a background thread with a result channel.

use std::sync::Arc;
use std::sync::mpsc;
use tokio::runtime::Runtime;

use crate::core::config::Config;
use crate::core::transport::{self, Exchange};

/// Receiver for a chat request in progress.
pub struct PendingChat {
    pub result_rx: mpsc::Receiver<Exchange>,
}

/// Receiver for a connection test in progress.
pub struct PendingTest {
    pub result_rx: mpsc::Receiver<bool>,
}

/// Spawn a chat request. The exchange always completes (offline reply on failure).
pub fn spawn_chat(
    rt: &Arc<Runtime>,
    config: Config,
    message: String,
    session_id: String,
) -> PendingChat {
    let (result_tx, result_rx) = mpsc::channel();
    let rt_clone = Arc::clone(rt);
    std::thread::spawn(move || {
        let exchange = rt_clone.block_on(transport::send_message(
            &config,
            &message,
            Some(&session_id),
        ));
        let _ = result_tx.send(exchange);
    });
    PendingChat { result_rx }
}

/// Spawn a connection test against `config` (the dialog's unsaved values).
pub fn spawn_connection_test(rt: &Arc<Runtime>, config: Config) -> PendingTest {
    let (result_tx, result_rx) = mpsc::channel();
    let rt_clone = Arc::clone(rt);
    std::thread::spawn(move || {
        let ok = rt_clone.block_on(transport::test_connection(&config));
        let _ = result_tx.send(ok);
    });
    PendingTest { result_rx }
}
