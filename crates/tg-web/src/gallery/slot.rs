use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use tg_flickr::Photo;

use crate::topic::Topic;

/// Search results held at once. The least recently requested text is dropped first.
pub const MAX_SEARCHES: usize = 64;

/// Fetch lifecycle of a single slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is outstanding.
    Loading,
    /// The latest fetch succeeded.
    Ready,
    /// The latest fetch failed; photos are from an earlier success, if any.
    Failed,
}

/// Photos held for one topic plus the bookkeeping of its latest fetch.
#[derive(Clone, Debug, Default)]
pub struct Slot {
    pub status: SlotStatus,
    /// API response order.
    pub photos: Arc<[Photo]>,
    /// Query the held photos answer.
    pub query: Option<String>,
    /// Query of the latest fetch, which may still be in flight.
    pub requested: Option<String>,
    pub generation: u64,
}

impl Slot {
    pub fn is_loading(&self) -> bool {
        self.status == SlotStatus::Loading
    }
}

/// Handle for one in-flight fetch. Only the ticket of a slot's latest
/// generation may write to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub topic: Topic,
    pub query: String,
    pub generation: u64,
}

/// What a finished fetch did to its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Slot replaced with this many photos.
    Loaded(usize),
    /// Slot marked failed, photos kept.
    Failed,
    /// A newer fetch owns the slot, or the slot was evicted; result discarded.
    Stale,
}

/// All topic slots. Mutated only through [`begin`](Self::begin),
/// [`succeed`](Self::succeed) and [`fail`](Self::fail).
///
/// Fixed topics own one slot each. Searches get one slot per search text, so
/// visitors looking at different searches never touch each other's fetches.
#[derive(Debug, Default)]
pub struct GalleryState {
    amalfi_coast: Slot,
    hallstat: Slot,
    santorini: Slot,
    searches: HashMap<String, Slot>,
    /// Search texts, least recently requested first.
    recent: VecDeque<String>,
    /// Shared by every slot so a re-created search slot never accepts an old ticket.
    last_generation: u64,
}

impl GalleryState {
    /// Slot of a fixed topic. `None` for [`Topic::Search`], see [`search`](Self::search).
    pub const fn fixed(&self, topic: Topic) -> Option<&Slot> {
        match topic {
            Topic::AmalfiCoast => Some(&self.amalfi_coast),
            Topic::Hallstat => Some(&self.hallstat),
            Topic::Santorini => Some(&self.santorini),
            Topic::Search => None,
        }
    }

    /// Slot holding the results for `text`, if it was ever requested and not evicted.
    pub fn search(&self, text: &str) -> Option<&Slot> {
        self.searches.get(text)
    }

    pub fn search_count(&self) -> usize {
        self.searches.len()
    }

    fn slot_mut(&mut self, topic: Topic, query: &str) -> Option<&mut Slot> {
        match topic {
            Topic::AmalfiCoast => Some(&mut self.amalfi_coast),
            Topic::Hallstat => Some(&mut self.hallstat),
            Topic::Santorini => Some(&mut self.santorini),
            Topic::Search => self.searches.get_mut(query),
        }
    }

    /// Search slot for `text`, created on first use. Marks it most recently requested.
    fn touch_search(&mut self, text: &str) -> &mut Slot {
        if let Some(pos) = self.recent.iter().position(|t| t == text) {
            self.recent.remove(pos);
        } else if self.recent.len() >= MAX_SEARCHES
            && let Some(oldest) = self.recent.pop_front()
        {
            tracing::debug!(text = %oldest, "Evicting search results");
            self.searches.remove(&oldest);
        }
        self.recent.push_back(text.to_string());
        self.searches.entry(text.to_string()).or_default()
    }

    /// Start a fetch: the slot goes to `Loading` and any older ticket becomes stale.
    pub fn begin(&mut self, topic: Topic, query: &str) -> FetchTicket {
        self.last_generation += 1;
        let generation = self.last_generation;

        let slot = match topic {
            Topic::AmalfiCoast => &mut self.amalfi_coast,
            Topic::Hallstat => &mut self.hallstat,
            Topic::Santorini => &mut self.santorini,
            Topic::Search => self.touch_search(query),
        };
        slot.generation = generation;
        slot.status = SlotStatus::Loading;
        slot.requested = Some(query.to_string());

        FetchTicket {
            topic,
            query: query.to_string(),
            generation,
        }
    }

    /// Replace the slot's photos with a successful response.
    pub fn succeed(&mut self, ticket: &FetchTicket, photos: Vec<Photo>) -> Completion {
        let Some(slot) = self.current_slot(ticket) else {
            return Completion::Stale;
        };

        let count = photos.len();
        slot.photos = photos.into();
        slot.query = Some(ticket.query.clone());
        slot.status = SlotStatus::Ready;
        Completion::Loaded(count)
    }

    /// Record a failed fetch. Photos are left as they were.
    pub fn fail(&mut self, ticket: &FetchTicket) -> Completion {
        let Some(slot) = self.current_slot(ticket) else {
            return Completion::Stale;
        };

        slot.status = SlotStatus::Failed;
        Completion::Failed
    }

    fn current_slot(&mut self, ticket: &FetchTicket) -> Option<&mut Slot> {
        self.slot_mut(ticket.topic, &ticket.query)
            .filter(|slot| slot.generation == ticket.generation)
    }
}
