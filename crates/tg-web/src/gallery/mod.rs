mod controller;
mod slot;

pub use controller::Gallery;
pub use slot::{Completion, FetchTicket, GalleryState, MAX_SEARCHES, Slot, SlotStatus};
