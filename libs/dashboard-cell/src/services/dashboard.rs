// libs/dashboard-cell/src/services/dashboard.rs
use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info};
use uuid::Uuid;

use booking_cell::models::{Appointment, AppointmentStatus, StatusChange, StoreError};
use booking_cell::store::AppointmentStore;

use crate::models::{filter_appointments, DashboardError, DashboardStats};

/// Read-side aggregation over the appointment store plus the admin's only
/// write: confirming or cancelling a pending appointment.
pub struct DashboardService {
    store: Arc<dyn AppointmentStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    pub async fn stats(&self) -> Result<DashboardStats, DashboardError> {
        let appointments = self.store.list_all().await.map_err(map_store)?;
        debug!("Computing dashboard stats over {} appointments", appointments.len());
        Ok(DashboardStats::from_appointments(
            &appointments,
            Local::now().date_naive(),
        ))
    }

    pub async fn appointments(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<Appointment>, DashboardError> {
        let appointments = self.store.list_all().await.map_err(map_store)?;
        Ok(match search {
            Some(query) if !query.trim().is_empty() => {
                filter_appointments(&appointments, query.trim())
                    .into_iter()
                    .cloned()
                    .collect()
            }
            _ => appointments,
        })
    }

    /// Confirm or cancel a pending appointment. The current status is
    /// checked first; anything already decided is left untouched.
    pub async fn update_status(
        &self,
        id: Uuid,
        change: StatusChange,
    ) -> Result<Appointment, DashboardError> {
        let current = self.store.get(id).await.map_err(map_store)?;
        if current.status != AppointmentStatus::Pending {
            return Err(DashboardError::NotPending(
                change.as_status().to_string(),
            ));
        }

        let updated = self.store.update_status(id, change).await.map_err(map_store)?;
        info!("Appointment {} marked {}", id, updated.status);
        Ok(updated)
    }
}

fn map_store(e: StoreError) -> DashboardError {
    match e {
        StoreError::NotFound => DashboardError::NotFound,
        StoreError::DatabaseError(msg) => DashboardError::StoreError(msg),
    }
}
