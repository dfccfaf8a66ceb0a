//! Thread-safe handle around a [`ParkingEngine`].
//!
//! All operations on the engine are serialized behind one mutex, so concurrent
//! callers observe the same atomic, non-interleaved behaviour as a single
//! caller would.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::analytics::EngineSnapshot;
use crate::domain::request::{Request, RequestId, RequestState, TimeUnit};
use crate::domain::zone::ZoneId;
use crate::error::{ParkadeError, Result};

use super::{AllocationResult, EngineConfig, ParkingEngine, ReleaseReceipt};

/// Cheaply clonable, mutex-guarded engine handle.
#[derive(Clone, Debug)]
pub struct SharedEngine {
    inner: Arc<Mutex<ParkingEngine>>,
}

impl SharedEngine {
    pub fn new(engine: ParkingEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn from_config(config: EngineConfig) -> Result<Self> {
        Ok(Self::new(ParkingEngine::new(config)?))
    }

    fn lock(&self) -> Result<MutexGuard<'_, ParkingEngine>> {
        self.inner
            .lock()
            .map_err(|_| ParkadeError::Other(anyhow::anyhow!("parking engine lock poisoned")))
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut ParkingEngine) -> Result<R>) -> Result<R> {
        let mut engine = self.lock()?;
        f(&mut engine)
    }

    pub fn submit_request(
        &self,
        vehicle_id: &str,
        zone_id: ZoneId,
        request_time: TimeUnit,
    ) -> Result<RequestId> {
        self.lock()?.submit_request(vehicle_id, zone_id, request_time)
    }

    pub fn allocate(&self, id: RequestId) -> Result<AllocationResult> {
        self.lock()?.allocate(id)
    }

    pub fn occupy(&self, id: RequestId) -> Result<()> {
        self.lock()?.occupy(id)
    }

    pub fn cancel(&self, id: RequestId) -> Result<()> {
        self.lock()?.cancel(id)
    }

    pub fn release(&self, id: RequestId, release_time: Option<TimeUnit>) -> Result<ReleaseReceipt> {
        self.lock()?.release(id, release_time)
    }

    pub fn rollback_last_allocation(&self) -> Result<Option<RequestId>> {
        self.lock()?.rollback_last_allocation()
    }

    pub fn rollback_last_allocations(&self, k: usize) -> Result<Vec<RequestId>> {
        self.lock()?.rollback_last_allocations(k)
    }

    pub fn snapshot(&self) -> Result<EngineSnapshot> {
        Ok(self.lock()?.snapshot())
    }

    /// Owned copy of a request.
    pub fn request(&self, id: RequestId) -> Result<Request> {
        self.lock()?.request(id).cloned()
    }

    pub fn requests_in_state(&self, state: RequestState) -> Result<Vec<Request>> {
        Ok(self.lock()?.requests_in_state(state).cloned().collect())
    }
}
