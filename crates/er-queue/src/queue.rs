//! `IncidentQueue` — min-heap over `(severity, insertion sequence)`.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use er_core::{Incident, IncidentId, Severity};

/// An incident together with the sequence number it was queued under.
#[derive(Clone, Debug)]
pub struct QueuedIncident {
    pub id:       IncidentId,
    pub incident: Incident,
}

impl QueuedIncident {
    #[inline]
    fn key(&self) -> (Severity, IncidentId) {
        (self.incident.severity, self.id)
    }
}

// Ordering looks only at the key; the payload (with its f64 coordinates) is
// never compared.
impl PartialEq for QueuedIncident {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueuedIncident {}

impl PartialOrd for QueuedIncident {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedIncident {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Priority-ordered multiset of pending incidents.
#[derive(Default)]
pub struct IncidentQueue {
    // Reverse makes BinaryHeap (max) behave as min-heap.
    heap:     BinaryHeap<Reverse<QueuedIncident>>,
    next_seq: u64,
}

impl IncidentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `incident` and return the sequence number it was assigned.
    pub fn push(&mut self, incident: Incident) -> IncidentId {
        let id = IncidentId(self.next_seq);
        self.next_seq += 1;
        self.heap.push(Reverse(QueuedIncident { id, incident }));
        id
    }

    /// Remove and return the most urgent incident (earliest on ties).
    pub fn pop(&mut self) -> Option<QueuedIncident> {
        self.heap.pop().map(|Reverse(q)| q)
    }

    /// The incident `pop` would return next, without removing it.
    pub fn peek(&self) -> Option<&QueuedIncident> {
        self.heap.peek().map(|Reverse(q)| q)
    }

    /// Remove every incident, most urgent first.
    pub fn drain_ordered(&mut self) -> Vec<QueuedIncident> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(q) = self.pop() {
            out.push(q);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Extend<Incident> for IncidentQueue {
    fn extend<I: IntoIterator<Item = Incident>>(&mut self, iter: I) {
        for incident in iter {
            self.push(incident);
        }
    }
}
