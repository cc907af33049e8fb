// libs/booking-cell/src/services/session.rs
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use directory_cell::models::{daily_slot_template, TimeSlot};
use directory_cell::services::directory::DirectoryService;
use shared_models::{Department, PatientIdentity};

use crate::machine::{BookingContext, BookingEvent, BookingState, DoctorList};
use crate::models::{BookingError, PatientInfoEdit};
use crate::store::AppointmentStore;

struct BookingSession {
    /// Identity of the signed-in patient who opened the session, if any.
    /// Locked for the whole session; re-applied after a restart.
    locked: Option<PatientIdentity>,
    state: BookingState,
}

/// Drives booking sessions: owns their state, performs the directory fetch
/// and the appointment commit, and feeds the results back into the machine
/// as events. Staleness and single-flight are machine properties; this
/// driver only supplies the transport.
pub struct BookingSessionService {
    sessions: Mutex<HashMap<Uuid, BookingSession>>,
    store: Arc<dyn AppointmentStore>,
    directory: Arc<DirectoryService>,
    slots: Vec<TimeSlot>,
}

impl BookingSessionService {
    pub fn new(store: Arc<dyn AppointmentStore>, directory: Arc<DirectoryService>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            store,
            directory,
            slots: daily_slot_template(),
        }
    }

    /// Open a fresh booking session. A signed-in patient's identity is
    /// captured here and locked for the lifetime of the session.
    pub async fn open(&self, locked: Option<PatientIdentity>) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.lock().await;
        sessions.insert(
            id,
            BookingSession {
                locked,
                state: BookingState::SelectDepartment,
            },
        );
        info!("Booking session {} opened", id);
        id
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<BookingState, BookingError> {
        let sessions = self.sessions.lock().await;
        let session = sessions.get(&id).ok_or(BookingError::SessionNotFound)?;
        Ok(session.state.clone())
    }

    /// Step 1: pick a department (directly or via the triage oracle), then
    /// fetch its doctors. The fetch result is keyed by the department that
    /// triggered it, so a result arriving after a re-selection is discarded
    /// by the machine.
    pub async fn choose_department(
        &self,
        id: Uuid,
        department: Department,
    ) -> Result<BookingState, BookingError> {
        self.apply(id, BookingEvent::DepartmentChosen(department)).await?;

        let doctors = match self.directory.list_doctors(Some(department)).await {
            Ok(doctors) => doctors,
            Err(e) => {
                warn!("Doctor fetch for {} failed: {}", department, e);
                Vec::new()
            }
        };

        self.apply(
            id,
            BookingEvent::DoctorsLoaded {
                department,
                doctors,
            },
        )
        .await
    }

    /// Step 2: pick a doctor out of the fetched list by id.
    pub async fn choose_doctor(&self, id: Uuid, doctor_id: i64) -> Result<BookingState, BookingError> {
        let doctor = {
            let sessions = self.sessions.lock().await;
            let session = sessions.get(&id).ok_or(BookingError::SessionNotFound)?;
            match &session.state {
                BookingState::SelectDoctor {
                    doctors: DoctorList::Loaded { doctors },
                    ..
                } => doctors
                    .iter()
                    .find(|d| d.id == doctor_id)
                    .cloned()
                    .ok_or(BookingError::DoctorNotInList)?,
                BookingState::SelectDoctor { .. } => return Err(BookingError::DoctorListPending),
                state => {
                    return Err(BookingError::InvalidTransition {
                        state: state.name(),
                        event: "doctor_chosen",
                    })
                }
            }
        };

        self.apply(id, BookingEvent::DoctorChosen(doctor)).await
    }

    pub async fn set_date(&self, id: Uuid, date: chrono::NaiveDate) -> Result<BookingState, BookingError> {
        self.apply(id, BookingEvent::DateChosen(date)).await
    }

    pub async fn set_slot(&self, id: Uuid, time: String) -> Result<BookingState, BookingError> {
        self.apply(id, BookingEvent::SlotChosen(time)).await
    }

    pub async fn edit_info(&self, id: Uuid, edit: PatientInfoEdit) -> Result<BookingState, BookingError> {
        self.apply(id, BookingEvent::InfoEdited(edit)).await
    }

    pub async fn back(&self, id: Uuid) -> Result<BookingState, BookingError> {
        let state = self.apply(id, BookingEvent::Back).await?;

        // Backing into the doctor step leaves the list pending again, so the
        // fetch is re-issued for the still-selected department.
        let BookingState::SelectDoctor {
            department,
            doctors: DoctorList::Pending,
        } = state
        else {
            return Ok(state);
        };

        let doctors = match self.directory.list_doctors(Some(department)).await {
            Ok(doctors) => doctors,
            Err(e) => {
                warn!("Doctor fetch for {} failed: {}", department, e);
                Vec::new()
            }
        };

        self.apply(
            id,
            BookingEvent::DoctorsLoaded {
                department,
                doctors,
            },
        )
        .await
    }

    pub async fn restart(&self, id: Uuid) -> Result<BookingState, BookingError> {
        self.apply(id, BookingEvent::Restart).await
    }

    /// Steps 3 → 4 → terminal: advance through the validation gate when
    /// still on the form, then issue the commit. The machine's commit phase
    /// guarantees at most one create call is in flight per session, and a
    /// finished commit is never re-issued.
    pub async fn confirm(&self, id: Uuid) -> Result<BookingState, BookingError> {
        let draft = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.get_mut(&id).ok_or(BookingError::SessionNotFound)?;

            if matches!(session.state, BookingState::ScheduleAndInfo { .. }) {
                apply_in_place(session, BookingEvent::Advance, &self.slots)?;
            }

            apply_in_place(session, BookingEvent::CommitStarted, &self.slots)?;

            session.state.draft().ok_or_else(|| {
                BookingError::StoreError("commit started without an assembled draft".to_string())
            })?
        };

        // The store call happens outside the session lock; the InFlight
        // phase keeps concurrent confirms for this session out.
        let outcome = self.store.create(draft).await;

        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(BookingError::SessionNotFound)?;

        match outcome {
            Ok(appointment) => {
                debug!("Session {} committed appointment {}", id, appointment.id);
                apply_in_place(session, BookingEvent::CommitSucceeded(appointment), &self.slots)?;
            }
            Err(e) => {
                warn!("Session {} commit failed: {}", id, e);
                apply_in_place(session, BookingEvent::CommitFailed(e.to_string()), &self.slots)?;
            }
        }

        Ok(session.state.clone())
    }

    async fn apply(&self, id: Uuid, event: BookingEvent) -> Result<BookingState, BookingError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(BookingError::SessionNotFound)?;
        apply_in_place(session, event, &self.slots)?;
        Ok(session.state.clone())
    }
}

fn apply_in_place(
    session: &mut BookingSession,
    event: BookingEvent,
    slots: &[TimeSlot],
) -> Result<(), BookingError> {
    let ctx = BookingContext {
        today: Local::now().date_naive(),
        slots,
        locked: session.locked.as_ref(),
    };
    // The transition consumes its input, so apply it to a copy; a rejected
    // event must leave the session state untouched.
    let next = session.state.clone().apply(event, &ctx)?;
    session.state = next;
    Ok(())
}
