use std::collections::{hash_map::Entry, HashMap};

use mars_rover_core::{Coordinates, RoverIndex};

/// Cells claimed during a single tick. Rebuilt every tick.
#[derive(Debug, Default)]
pub(crate) struct BookingLedger {
    bookings: HashMap<Coordinates, RoverIndex>,
}

impl BookingLedger {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            bookings: HashMap::with_capacity(capacity),
        }
    }

    /// Claims `cell` for `rover` unless it is already held, returning the
    /// holder on conflict. The first claim on a cell always wins.
    pub(crate) fn claim(&mut self, cell: Coordinates, rover: RoverIndex) -> Result<(), RoverIndex> {
        match self.bookings.entry(cell) {
            Entry::Occupied(holder) => Err(*holder.get()),
            Entry::Vacant(slot) => {
                let _ = slot.insert(rover);
                Ok(())
            }
        }
    }
}
