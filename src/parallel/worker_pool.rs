use std::sync::Arc;
use std::thread;

use async_channel::{Receiver, Sender};
use tracing::debug;
use uuid::Uuid;

use crate::error::PipelineError;

type Job = Box<dyn FnOnce(Uuid) + Send + 'static>;

/// Fixed-size pool of OS threads fed jobs over a bounded channel.
///
/// Each job receives the id of the worker that picked it up, which is
/// all the coordination the map phase needs: a job owns its chunk and
/// reports its counts on a channel of its own. Dropping the pool closes
/// the job channel and joins every worker.
pub struct WorkerPool {
    workers: Vec<Worker>,
    sender: Sender<Job>,
}

impl WorkerPool {
    pub fn new(size: usize) -> WorkerPool {
        assert!(size > 0);

        let (sender, receiver) = async_channel::bounded(size);
        let receiver = Arc::new(receiver);
        let mut workers = Vec::with_capacity(size);

        for _ in 0..size {
            workers.push(Worker::new(Arc::clone(&receiver)));
        }

        WorkerPool { workers, sender }
    }

    /// Queues one job; `Err` means every worker is already gone.
    pub async fn submit<F>(&self, job: F) -> Result<(), PipelineError>
    where
        F: FnOnce(Uuid) + Send + 'static,
    {
        self.sender
            .send(Box::new(job))
            .await
            .map_err(|_| PipelineError::PoolClosed)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.sender.close();
        for worker in self.workers.drain(..) {
            // a worker that panicked already shows up as a missing
            // chunk result at the gather site
            let _ = worker.thread.join();
        }
    }
}

struct Worker {
    thread: thread::JoinHandle<()>,
}

impl Worker {
    fn new(receiver: Arc<Receiver<Job>>) -> Worker {
        let id = Uuid::new_v4();
        let thread = thread::spawn(move || {
            debug!("worker {id} up");
            while let Ok(job) = receiver.recv_blocking() {
                job(id);
            }
            debug!("worker {id} down");
        });

        Worker { thread }
    }
}
