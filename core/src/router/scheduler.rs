//! Next-tick scheduling
//!
//! Work that has to observe the document after a synchronous swap (scroll
//! restore, header chrome, page initializers) is queued here and runs on the
//! following tick, when the owner drains the queue. Tasks queued while a tick
//! runs land in the tick after it.

use crate::document::Document;
use std::collections::VecDeque;

/// A deferred callback
pub type Task = Box<dyn FnOnce(&mut TickContext<'_>) -> anyhow::Result<()>>;

/// What a deferred callback gets to work with
pub struct TickContext<'a> {
    pub document: &'a mut Document,
    queue: &'a mut TickQueue,
}

impl TickContext<'_> {
    /// Defer more work to the following tick
    pub fn defer<F>(&mut self, label: impl Into<String>, task: F)
    where
        F: FnOnce(&mut TickContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.queue.defer(label, task);
    }
}

struct Scheduled {
    label: String,
    task: Task,
}

/// Outcome of draining one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub ran: usize,
    pub failed: usize,
}

/// FIFO of deferred callbacks
#[derive(Default)]
pub struct TickQueue {
    pending: VecDeque<Scheduled>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task for the next tick
    pub fn defer<F>(&mut self, label: impl Into<String>, task: F)
    where
        F: FnOnce(&mut TickContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.pending.push_back(Scheduled {
            label: label.into(),
            task: Box::new(task),
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every task queued after the first `len`
    pub fn truncate(&mut self, len: usize) {
        self.pending.truncate(len);
    }

    /// Run every task that was queued before this call
    ///
    /// A failing task is logged and does not prevent the rest of the tick
    /// from running.
    pub fn run_tick(&mut self, document: &mut Document) -> TickReport {
        let batch = std::mem::take(&mut self.pending);
        let mut report = TickReport::default();

        for scheduled in batch {
            let mut ctx = TickContext {
                document: &mut *document,
                queue: &mut *self,
            };
            report.ran += 1;
            if let Err(e) = (scheduled.task)(&mut ctx) {
                report.failed += 1;
                tracing::error!("Deferred task '{}' failed: {:#}", scheduled.label, e);
            }
        }

        report
    }

    /// Run ticks until the queue is empty or `max_ticks` ticks have run
    pub fn settle(&mut self, document: &mut Document, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while !self.is_empty() {
            if ticks == max_ticks {
                tracing::warn!(
                    "Tick queue still has {} task(s) after {} ticks; leaving them queued",
                    self.len(),
                    max_ticks
                );
                break;
            }
            self.run_tick(document);
            ticks += 1;
        }
        ticks
    }
}

impl std::fmt::Debug for TickQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickQueue")
            .field(
                "pending",
                &self.pending.iter().map(|s| s.label.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_tasks_run_in_queue_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut queue = TickQueue::new();
        let mut doc = Document::new(10);

        for name in ["first", "second", "third"] {
            let log = log.clone();
            queue.defer(name, move |_| {
                log.borrow_mut().push(name);
                Ok(())
            });
        }

        let report = queue.run_tick(&mut doc);
        assert_eq!(report, TickReport { ran: 3, failed: 0 });
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_nested_defer_runs_next_tick() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut queue = TickQueue::new();
        let mut doc = Document::new(10);

        let outer_log = log.clone();
        queue.defer("outer", move |ctx| {
            outer_log.borrow_mut().push("outer");
            let inner_log = outer_log.clone();
            ctx.defer("inner", move |_| {
                inner_log.borrow_mut().push("inner");
                Ok(())
            });
            Ok(())
        });

        queue.run_tick(&mut doc);
        assert_eq!(*log.borrow(), vec!["outer"]);
        assert_eq!(queue.len(), 1);

        queue.run_tick(&mut doc);
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_failing_task_does_not_stop_tick() {
        let mut queue = TickQueue::new();
        let mut doc = Document::new(10);

        queue.defer("broken", |_| Err(anyhow::anyhow!("chart canvas missing")));
        queue.defer("fine", |ctx| {
            ctx.document.container.set_markup("ok");
            Ok(())
        });

        let report = queue.run_tick(&mut doc);
        assert_eq!(report, TickReport { ran: 2, failed: 1 });
        assert_eq!(doc.container.markup(), "ok");
    }

    #[test]
    fn test_truncate_drops_newest_tasks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut queue = TickQueue::new();
        let mut doc = Document::new(10);

        for name in ["scroll-restore", "device-table", "device-chart"] {
            let log = log.clone();
            queue.defer(name, move |_| {
                log.borrow_mut().push(name);
                Ok(())
            });
        }
        queue.truncate(1);
        assert_eq!(queue.len(), 1);

        queue.run_tick(&mut doc);
        assert_eq!(*log.borrow(), vec!["scroll-restore"]);
    }

    #[test]
    fn test_settle_is_bounded() {
        fn requeue(ctx: &mut TickContext<'_>) -> anyhow::Result<()> {
            ctx.defer("again", requeue);
            Ok(())
        }

        let mut queue = TickQueue::new();
        let mut doc = Document::new(10);
        queue.defer("again", requeue);

        assert_eq!(queue.settle(&mut doc, 5), 5);
        assert_eq!(queue.len(), 1);
    }
}
