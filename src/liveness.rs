//! Guard against stale request results.
//!
//! Calls are never cancelled in flight; a caller that has moved on simply
//! discards the eventual result. The risk is a late result being applied
//! to a view that has since been re-rendered with newer data. A
//! [`RequestSeq`] stamps each issued call, and the caller checks the stamp
//! before applying the outcome.

use std::sync::atomic::{AtomicU64, Ordering};

/// Generation counter for a sequence of calls where only the latest
/// result matters (search-as-you-type, filter changes, tab switches).
///
/// ```rust,ignore
/// let ticket = seq.begin();
/// let cars = client.fetch_all_cars().await?;
/// if ticket.is_current() {
///     view.show(cars);
/// } // else: a newer call superseded this one — drop the result.
/// ```
#[derive(Debug, Default)]
pub struct RequestSeq {
    generation: AtomicU64,
}

impl RequestSeq {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
        }
    }

    /// Start a new call, invalidating every earlier ticket.
    #[must_use]
    pub fn begin(&self) -> Ticket<'_> {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { seq: self, id }
    }
}

/// Stamp for one issued call.
#[derive(Debug)]
pub struct Ticket<'a> {
    seq: &'a RequestSeq,
    id: u64,
}

impl Ticket<'_> {
    /// True while no newer call has been started on the same sequence.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.seq.generation.load(Ordering::SeqCst) == self.id
    }
}
