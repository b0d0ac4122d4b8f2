// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The render engine: a fixed-size pool of workers draining a shared
//! queue of render contexts, with cooperative cancellation.
//!
//! The pool size bounds concurrency independently of the partition
//! count; a render partitioned into many contexts still runs on
//! exactly `threads` workers.  Completion and cancellation are both
//! observed with a blocking `select!` over channels; nothing in here
//! polls.

use crossbeam::channel::{unbounded, Receiver, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::context::RenderContext;
use crate::errors::Error;

/// True once the cancellation signal has fired.  A signal fires when
/// the caller sends on it or drops its sending half; an untouched
/// channel is not a cancellation.
pub fn cancelled(cancel: &Receiver<()>) -> bool {
    match cancel.try_recv() {
        Err(TryRecvError::Empty) => false,
        _ => true,
    }
}

/// Execute every context on a pool of `threads` workers, writing into
/// the contexts' bands.  Returns Ok only after every context has
/// completed.  If `cancel` fires first, no further context is started,
/// in-flight bands are allowed to finish, and the call returns
/// `Error::Cancelled`; the output buffer is then partial garbage.
///
/// Cancellation may race with natural completion, in which case
/// either outcome is legitimate; the call never hangs either way.
pub fn render(
    threads: usize,
    contexts: Vec<RenderContext>,
    cancel: &Receiver<()>,
) -> Result<(), Error> {
    if cancelled(cancel) {
        return Err(Error::Cancelled);
    }

    let count = contexts.len();
    let jobs = Arc::new(Mutex::new(contexts.into_iter()));
    let stop = AtomicBool::new(false);
    let (done_tx, done_rx) = unbounded();
    let cancel_watch = cancel.clone();

    crossbeam::scope(|spawner| {
        for _ in 0..threads.max(1) {
            let jobs = jobs.clone();
            let done = done_tx.clone();
            let cancel = cancel.clone();
            let stop = &stop;

            spawner.spawn(move |_| loop {
                if stop.load(Ordering::Relaxed) || cancelled(&cancel) {
                    // Make sure the other workers stand down too,
                    // even if this one consumed the signal.
                    stop.store(true, Ordering::Relaxed);
                    break;
                }

                let job = { jobs.lock().unwrap().next() };
                match job {
                    Some(mut context) => {
                        context.render_band();
                        let _ = done.send(());
                    }
                    None => break,
                }
            });
        }

        // Only the workers' clones may keep the completion channel
        // open; otherwise a cancelled pool would never disconnect it.
        drop(done_tx);

        let mut finished = 0;
        while finished < count {
            crossbeam::select! {
                recv(done_rx) -> msg => match msg {
                    Ok(()) => finished += 1,
                    // All workers bailed out before finishing the
                    // queue; that only happens on cancellation.
                    Err(_) => return Err(Error::Cancelled),
                },
                recv(cancel_watch) -> _ => {
                    stop.store(true, Ordering::Relaxed);
                    return Err(Error::Cancelled);
                }
            }
        }

        Ok(())
    })
    .unwrap()
}
