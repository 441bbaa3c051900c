//! Event sources
//!
//! Anything that can hand the engine a snapshot of purchase events. Sources
//! validate and convert their own storage representation at the boundary.

use crate::error::Result;
use crate::models::PurchaseEvent;

pub trait EventSource {
    /// Load every decided event the source holds
    fn load_events(&self) -> Result<Vec<PurchaseEvent>>;
}

impl EventSource for Vec<PurchaseEvent> {
    fn load_events(&self) -> Result<Vec<PurchaseEvent>> {
        Ok(self.clone())
    }
}
