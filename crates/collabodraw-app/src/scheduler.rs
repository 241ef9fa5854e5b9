//! Periodic tasks polled from the host loop.

use collabodraw_core::time::{Duration, Instant};

/// A recurring background job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Advance the session timer.
    TimerTick,
    /// Move the simulated remote cursors.
    RefreshCursors,
    /// Save the board if it has unsaved changes.
    AutoSave,
}

#[derive(Debug, Clone)]
struct Entry {
    task: Task,
    interval: Duration,
    next_due: Instant,
}

/// Fixed-interval task list.
///
/// Tasks never run on their own; `poll` reports which ones are due and
/// reschedules them. A task that fell several intervals behind runs once.
#[derive(Debug, Clone)]
pub struct Scheduler {
    entries: Vec<Entry>,
}

impl Scheduler {
    /// Schedule the standard tasks starting from `now`.
    pub fn new(now: Instant, autosave: Duration, cursors: Duration) -> Self {
        let mut scheduler = Self { entries: Vec::new() };
        scheduler.add(Task::TimerTick, Duration::from_secs(1), now);
        scheduler.add(Task::RefreshCursors, cursors, now);
        scheduler.add(Task::AutoSave, autosave, now);
        scheduler
    }

    fn add(&mut self, task: Task, interval: Duration, now: Instant) {
        self.entries.push(Entry {
            task,
            interval,
            next_due: now + interval,
        });
    }

    /// Tasks due at `now`, in registration order.
    pub fn poll(&mut self, now: Instant) -> Vec<Task> {
        let mut due = Vec::new();
        for entry in &mut self.entries {
            if now < entry.next_due {
                continue;
            }
            due.push(entry.task);
            entry.next_due += entry.interval;
            if entry.next_due <= now {
                entry.next_due = now + entry.interval;
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler(start: Instant) -> Scheduler {
        Scheduler::new(start, Duration::from_secs(30), Duration::from_secs(2))
    }

    #[test]
    fn test_nothing_due_immediately() {
        let start = Instant::now();
        assert!(scheduler(start).poll(start).is_empty());
    }

    #[test]
    fn test_tasks_fire_on_their_intervals() {
        let start = Instant::now();
        let mut scheduler = scheduler(start);
        assert_eq!(scheduler.poll(start + Duration::from_secs(1)), vec![Task::TimerTick]);
        assert_eq!(
            scheduler.poll(start + Duration::from_secs(2)),
            vec![Task::TimerTick, Task::RefreshCursors]
        );
        assert_eq!(
            scheduler.poll(start + Duration::from_secs(30)),
            vec![Task::TimerTick, Task::RefreshCursors, Task::AutoSave]
        );
    }

    #[test]
    fn test_late_poll_runs_once() {
        let start = Instant::now();
        let mut scheduler = scheduler(start);
        let late = start + Duration::from_secs(10);
        let due = scheduler.poll(late);
        assert_eq!(due.iter().filter(|t| **t == Task::TimerTick).count(), 1);
        // Rescheduled relative to the late poll
        assert_eq!(scheduler.poll(late), Vec::<Task>::new());
        assert_eq!(scheduler.poll(late + Duration::from_secs(1)), vec![Task::TimerTick]);
    }
}
