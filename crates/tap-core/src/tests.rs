//! Unit tests for tap-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ArcId, NodeId};

    #[test]
    fn index_cast() {
        assert_eq!(NodeId(42).index(), 42);
        assert_eq!(usize::from(ArcId(7)), 7);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(ArcId(100) > ArcId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(ArcId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod heap {
    use crate::{NodeHeap, NodeId};

    #[test]
    fn starts_empty_with_infinite_keys() {
        let h = NodeHeap::new(4);
        assert!(h.is_empty());
        for v in 0..4 {
            assert!(h.value(NodeId(v)).is_infinite());
        }
    }

    #[test]
    fn pops_in_key_order() {
        let mut h = NodeHeap::new(5);
        h.insert(NodeId(0), 3.0);
        h.insert(NodeId(1), 1.0);
        h.insert(NodeId(2), 2.0);
        h.insert(NodeId(3), 5.0);
        h.insert(NodeId(4), 4.0);

        let order: Vec<u32> = std::iter::from_fn(|| h.pop_min()).map(|v| v.0).collect();
        assert_eq!(order, [1, 2, 0, 4, 3]);
    }

    #[test]
    fn decrease_key_reorders() {
        let mut h = NodeHeap::new(3);
        h.insert(NodeId(0), 10.0);
        h.insert(NodeId(1), 20.0);
        h.insert(NodeId(2), 30.0);
        h.decrease_key(NodeId(2), 5.0);
        assert_eq!(h.pop_min(), Some(NodeId(2)));
        assert_eq!(h.pop_min(), Some(NodeId(0)));
    }

    #[test]
    fn improve_sets_key_without_queueing() {
        let mut h = NodeHeap::new(2);
        h.improve(NodeId(1), 7.5);
        assert!(!h.contains(NodeId(1)));
        assert!(h.is_empty());
        assert_eq!(h.value(NodeId(1)), 7.5);
    }

    #[test]
    fn into_values_returns_labels() {
        let mut h = NodeHeap::new(3);
        h.insert(NodeId(0), 0.0);
        h.insert(NodeId(2), 4.0);
        while h.pop_min().is_some() {}
        let labels = h.into_values();
        assert_eq!(labels[0], 0.0);
        assert!(labels[1].is_infinite());
        assert_eq!(labels[2], 4.0);
    }

    #[test]
    fn contains_tracks_membership() {
        let mut h = NodeHeap::new(2);
        h.insert(NodeId(0), 1.0);
        assert!(h.contains(NodeId(0)));
        assert!(!h.contains(NodeId(1)));
        h.pop_min();
        assert!(!h.contains(NodeId(0)));
        assert_eq!(h.len(), 0);
    }
}

#[cfg(test)]
mod queue {
    use crate::{NodeId, QueueHistory, SearchQueue};

    #[test]
    fn fifo_order() {
        let mut q = SearchQueue::new(4, 4);
        q.push_back(NodeId(0));
        q.push_back(NodeId(1));
        q.push_back(NodeId(2));
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop_front(), Some(NodeId(0)));
        assert_eq!(q.pop_front(), Some(NodeId(1)));
        assert_eq!(q.pop_front(), Some(NodeId(2)));
        assert_eq!(q.pop_front(), None);
    }

    #[test]
    fn push_front_jumps_the_line() {
        let mut q = SearchQueue::new(4, 4);
        q.push_back(NodeId(0));
        q.push_back(NodeId(1));
        q.push_front(NodeId(3));
        assert_eq!(q.pop_front(), Some(NodeId(3)));
        assert_eq!(q.pop_front(), Some(NodeId(0)));
    }

    #[test]
    fn history_flips_on_dequeue() {
        let mut q = SearchQueue::new(2, 2);
        assert_eq!(q.history(NodeId(0)), QueueHistory::NeverQueued);
        q.push_back(NodeId(0));
        // Queued but not yet dequeued: still NeverQueued.
        assert_eq!(q.history(NodeId(0)), QueueHistory::NeverQueued);
        q.pop_front();
        assert_eq!(q.history(NodeId(0)), QueueHistory::WasQueued);
    }

    #[test]
    fn wraps_around_capacity() {
        let mut q = SearchQueue::new(2, 8);
        q.push_back(NodeId(0));
        q.push_back(NodeId(1));
        assert_eq!(q.pop_front(), Some(NodeId(0)));
        q.push_back(NodeId(2));
        assert_eq!(q.pop_front(), Some(NodeId(1)));
        assert_eq!(q.pop_front(), Some(NodeId(2)));
        assert!(q.is_empty());
    }
}

#[cfg(test)]
mod verbosity {
    use crate::Verbosity;

    #[test]
    fn level_ordering() {
        assert!(Verbosity::None < Verbosity::Low);
        assert!(Verbosity::Low < Verbosity::Medium);
        assert!(Verbosity::Medium < Verbosity::Full);
        assert!(Verbosity::Full < Verbosity::Debug);
    }

    #[test]
    fn admits_at_or_below_threshold() {
        let sink = Verbosity::Medium;
        assert!(sink.admits(Verbosity::Low));
        assert!(sink.admits(Verbosity::Medium));
        assert!(!sink.admits(Verbosity::Full));
        assert!(!Verbosity::None.admits(Verbosity::Low));
    }

    #[test]
    fn display() {
        assert_eq!(Verbosity::Full.to_string(), "full");
        assert_eq!(Verbosity::default(), Verbosity::Low);
    }
}
