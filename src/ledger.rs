//! Request ledger.
//!
//! Owns every request ever submitted plus the identifier sequence. Requests are
//! never removed: cancelled and released entries stay for analytics and audit.

use crate::domain::request::{Request, RequestId, RequestState, TimeUnit};
use crate::domain::zone::{ZoneId, ZoneRegistry};
use crate::error::{ParkadeError, Result};

#[derive(Debug, Clone)]
pub struct RequestLedger {
    /// Entry `i` holds the request with id `i + 1`.
    requests: Vec<Request>,
    next_id: u64,
}

impl Default for RequestLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLedger {
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            next_id: 1,
        }
    }

    /// Id the next created request will receive. Ids start at 1 and are never
    /// reused.
    pub fn next_id(&self) -> RequestId {
        RequestId(self.next_id)
    }

    /// Validate and store a new `Requested` request.
    ///
    /// # Errors
    /// `InvalidArgument` for a blank vehicle id, a zone outside `zones`, or a
    /// negative request time. Nothing is stored and no id is consumed.
    pub fn create(
        &mut self,
        zones: &ZoneRegistry,
        vehicle_id: &str,
        zone_id: ZoneId,
        request_time: TimeUnit,
    ) -> Result<&Request> {
        let vehicle_id = vehicle_id.trim();
        if vehicle_id.is_empty() {
            return Err(ParkadeError::InvalidArgument(
                "vehicle id must not be empty".to_string(),
            ));
        }
        if !zones.contains(zone_id) {
            return Err(ParkadeError::InvalidArgument(format!(
                "zone {} is not registered",
                zone_id
            )));
        }
        if request_time < 0 {
            return Err(ParkadeError::InvalidArgument(format!(
                "request time must be non-negative, got {}",
                request_time
            )));
        }

        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.requests
            .push(Request::new(id, vehicle_id.to_string(), zone_id, request_time));
        Ok(&self.requests[self.requests.len() - 1])
    }

    fn index(&self, id: RequestId) -> Option<usize> {
        let idx = usize::try_from(id.0.checked_sub(1)?).ok()?;
        (idx < self.requests.len()).then_some(idx)
    }

    pub fn get(&self, id: RequestId) -> Result<&Request> {
        self.index(id)
            .map(|idx| &self.requests[idx])
            .ok_or(ParkadeError::RequestNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: RequestId) -> Result<&mut Request> {
        match self.index(id) {
            Some(idx) => Ok(&mut self.requests[idx]),
            None => Err(ParkadeError::RequestNotFound(id)),
        }
    }

    /// All requests in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }

    pub fn filter_by_state(&self, state: RequestState) -> impl Iterator<Item = &Request> {
        self.requests.iter().filter(move |r| r.state == state)
    }

    /// Durations of every released request.
    pub fn released_durations(&self) -> impl Iterator<Item = TimeUnit> + '_ {
        self.requests.iter().filter_map(Request::duration)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
