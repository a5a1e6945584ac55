//! Worker-pool primitives for the parallel root search.
//!
//! The pool is a fixed set of scoped threads pulling task indices from a shared
//! counter. Results are handed back over a channel as they finish, so the
//! caller sees completion order, not submission order. A task that panics is
//! reported as a failed unit without disturbing its siblings.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

/// Threading configuration owned by the engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadingConfig {
    pub requested_threads: usize,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self {
            requested_threads: thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl ThreadingConfig {
    #[inline]
    pub fn new(requested_threads: usize) -> Self {
        Self { requested_threads }
    }

    #[inline]
    pub fn normalized_threads(self) -> usize {
        self.requested_threads.max(1)
    }

    /// Threads actually started for `task_count` tasks.
    #[inline]
    pub fn workers_for(self, task_count: usize) -> usize {
        self.normalized_threads().min(task_count)
    }
}

/// One finished unit of work.
#[derive(Debug)]
pub struct CompletedTask<R> {
    /// Index of the task in the submitted slice.
    pub index: usize,
    /// The task's value, or the panic message if it failed.
    pub result: Result<R, String>,
}

/// Runs `work` over every task on a bounded pool and feeds each result to
/// `on_complete` on the calling thread, in completion order. Returns once all
/// tasks are done.
pub fn run_in_completion_order<T, R, W, C>(
    tasks: &[T],
    config: ThreadingConfig,
    work: W,
    mut on_complete: C,
) where
    T: Sync,
    R: Send,
    W: Fn(&T) -> R + Sync,
    C: FnMut(CompletedTask<R>),
{
    if tasks.is_empty() {
        return;
    }
    let workers = config.workers_for(tasks.len());
    let next = AtomicUsize::new(0);
    let (sender, receiver) = mpsc::channel();

    thread::scope(|scope| {
        for _ in 0..workers {
            let sender = sender.clone();
            let next = &next;
            let work = &work;
            scope.spawn(move || loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                let Some(task) = tasks.get(index) else {
                    break;
                };
                let result =
                    panic::catch_unwind(AssertUnwindSafe(|| work(task))).map_err(panic_message);
                if sender.send(CompletedTask { index, result }).is_err() {
                    break;
                }
            });
        }
        drop(sender);

        for completed in receiver {
            on_complete(completed);
        }
    });
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threading_config_normalizes_threads() {
        let cfg = ThreadingConfig::new(0);
        assert_eq!(cfg.normalized_threads(), 1);
        assert_eq!(ThreadingConfig::new(8).workers_for(3), 3);
        assert!(ThreadingConfig::default().normalized_threads() >= 1);
    }

    #[test]
    fn every_task_completes_once() {
        let tasks: Vec<u64> = (0..50).collect();
        let mut seen = vec![0u32; tasks.len()];
        let mut sum = 0;
        run_in_completion_order(&tasks, ThreadingConfig::new(4), |n| n * 2, |done| {
            seen[done.index] += 1;
            sum += done.result.expect("no task fails");
        });
        assert!(seen.iter().all(|&count| count == 1));
        assert_eq!(sum, 2 * (0..50).sum::<u64>());
    }

    #[test]
    fn panicking_task_is_isolated() {
        let tasks = vec![1, 2, 3, 4];
        let mut ok = Vec::new();
        let mut failed = Vec::new();
        run_in_completion_order(
            &tasks,
            ThreadingConfig::new(2),
            |&n| {
                if n == 3 {
                    panic!("bad candidate {n}");
                }
                n
            },
            |done| match done.result {
                Ok(v) => ok.push(v),
                Err(message) => failed.push((done.index, message)),
            },
        );
        ok.sort();
        assert_eq!(ok, vec![1, 2, 4]);
        assert_eq!(failed, vec![(2, "bad candidate 3".to_owned())]);
    }

    #[test]
    fn empty_task_list_is_a_no_op() {
        let tasks: Vec<u8> = Vec::new();
        let mut calls = 0;
        run_in_completion_order(&tasks, ThreadingConfig::new(3), |&n| n, |_| calls += 1);
        assert_eq!(calls, 0);
    }
}
