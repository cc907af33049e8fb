// libs/booking-cell/src/machine.rs
//
// The booking flow as an explicit tagged-union state machine: one value for
// the current step, one pure transition function. Illegal transitions are
// errors, not silent no-ops, with one deliberate exception (stale doctor
// fetches, which are discarded).
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use directory_cell::models::{Doctor, TimeSlot};
use shared_models::{Department, PatientIdentity};

use crate::models::{
    Appointment, AppointmentDraft, BookingError, PatientInfo, PatientInfoEdit,
};

fn tc_regex() -> &'static Regex {
    static TC_RE: OnceLock<Regex> = OnceLock::new();
    TC_RE.get_or_init(|| Regex::new(r"^\d{11}$").expect("valid tc regex"))
}

/// Result of the asynchronous directory fetch for the chosen department.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "fetch")]
pub enum DoctorList {
    Pending,
    Loaded { doctors: Vec<Doctor> },
}

/// Commit progress inside the Confirming step. Success is its own state,
/// so re-entering Confirming can never re-issue a finished commit.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum CommitPhase {
    NotStarted,
    InFlight,
    Failed { reason: String },
}

/// Schedule and patient data gathered in step three.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduleForm {
    pub date: NaiveDate,
    pub time: Option<String>,
    pub info: PatientInfo,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "step")]
pub enum BookingState {
    SelectDepartment,
    SelectDoctor {
        department: Department,
        doctors: DoctorList,
    },
    ScheduleAndInfo {
        department: Department,
        doctor: Doctor,
        form: ScheduleForm,
    },
    Confirming {
        department: Department,
        doctor: Doctor,
        form: ScheduleForm,
        commit: CommitPhase,
    },
    Success {
        appointment: Appointment,
    },
}

#[derive(Debug, Clone)]
pub enum BookingEvent {
    DepartmentChosen(Department),
    /// Completion of the directory fetch keyed by the department that
    /// triggered it. Discarded when the selection has since changed.
    DoctorsLoaded {
        department: Department,
        doctors: Vec<Doctor>,
    },
    DoctorChosen(Doctor),
    DateChosen(NaiveDate),
    SlotChosen(String),
    InfoEdited(PatientInfoEdit),
    Advance,
    CommitStarted,
    CommitSucceeded(Appointment),
    CommitFailed(String),
    Back,
    Restart,
}

/// Inputs the transition function needs besides the state and the event.
pub struct BookingContext<'a> {
    pub today: NaiveDate,
    pub slots: &'a [TimeSlot],
    /// Set when a signed-in patient opened the session; name/tc/age are
    /// pre-filled from it and immutable for the session.
    pub locked: Option<&'a PatientIdentity>,
}

impl BookingState {
    pub fn name(&self) -> &'static str {
        match self {
            BookingState::SelectDepartment => "select_department",
            BookingState::SelectDoctor { .. } => "select_doctor",
            BookingState::ScheduleAndInfo { .. } => "schedule_and_info",
            BookingState::Confirming { .. } => "confirming",
            BookingState::Success { .. } => "success",
        }
    }

    /// The single transition function. Consumes the current state and
    /// returns the next one, or an error leaving the caller's state as-is.
    pub fn apply(
        self,
        event: BookingEvent,
        ctx: &BookingContext<'_>,
    ) -> Result<BookingState, BookingError> {
        match (self, event) {
            // Step 1 → 2: any enumerated department is acceptable.
            (BookingState::SelectDepartment, BookingEvent::DepartmentChosen(department)) => {
                Ok(BookingState::SelectDoctor {
                    department,
                    doctors: DoctorList::Pending,
                })
            }

            // Re-selecting a department clears the previous fetch.
            (BookingState::SelectDoctor { .. }, BookingEvent::DepartmentChosen(department)) => {
                Ok(BookingState::SelectDoctor {
                    department,
                    doctors: DoctorList::Pending,
                })
            }

            (
                BookingState::SelectDoctor { department, doctors },
                BookingEvent::DoctorsLoaded { department: fetched_for, doctors: fetched },
            ) => {
                if fetched_for != department {
                    // Stale result of a superseded fetch; discard it.
                    warn!(
                        "Discarding stale doctor fetch for {} (current selection {})",
                        fetched_for, department
                    );
                    return Ok(BookingState::SelectDoctor { department, doctors });
                }
                debug!("Doctor list loaded for {} ({} doctors)", department, fetched.len());
                Ok(BookingState::SelectDoctor {
                    department,
                    doctors: DoctorList::Loaded { doctors: fetched },
                })
            }

            (
                BookingState::SelectDoctor { department, doctors },
                BookingEvent::DoctorChosen(doctor),
            ) => {
                let DoctorList::Loaded { doctors: list } = &doctors else {
                    return Err(BookingError::DoctorListPending);
                };
                if !list.iter().any(|d| d.id == doctor.id) || doctor.department != department {
                    return Err(BookingError::DoctorNotInList);
                }
                Ok(BookingState::ScheduleAndInfo {
                    department,
                    doctor,
                    form: ScheduleForm {
                        date: ctx.today,
                        time: None,
                        info: prefill(ctx.locked),
                    },
                })
            }

            (BookingState::SelectDoctor { .. }, BookingEvent::Back) => {
                Ok(BookingState::SelectDepartment)
            }

            (
                BookingState::ScheduleAndInfo { department, doctor, mut form },
                BookingEvent::DateChosen(date),
            ) => {
                if date < ctx.today {
                    return Err(BookingError::DateInPast);
                }
                form.date = date;
                Ok(BookingState::ScheduleAndInfo { department, doctor, form })
            }

            (
                BookingState::ScheduleAndInfo { department, doctor, mut form },
                BookingEvent::SlotChosen(time),
            ) => {
                let offerable = ctx
                    .slots
                    .iter()
                    .any(|slot| slot.time == time && slot.available);
                if !offerable {
                    return Err(BookingError::SlotUnavailable(time));
                }
                form.time = Some(time);
                Ok(BookingState::ScheduleAndInfo { department, doctor, form })
            }

            (
                BookingState::ScheduleAndInfo { department, doctor, mut form },
                BookingEvent::InfoEdited(edit),
            ) => {
                apply_edit(&mut form.info, edit, ctx.locked)?;
                Ok(BookingState::ScheduleAndInfo { department, doctor, form })
            }

            (
                BookingState::ScheduleAndInfo { department, doctor, form },
                BookingEvent::Advance,
            ) => {
                validation_gate(&form)?;
                Ok(BookingState::Confirming {
                    department,
                    doctor,
                    form,
                    commit: CommitPhase::NotStarted,
                })
            }

            (
                BookingState::ScheduleAndInfo { department, .. },
                BookingEvent::Back,
            ) => Ok(BookingState::SelectDoctor {
                department,
                doctors: DoctorList::Pending,
            }),

            (
                BookingState::Confirming { department, doctor, form, commit },
                BookingEvent::CommitStarted,
            ) => match commit {
                CommitPhase::InFlight => Err(BookingError::CommitInFlight),
                // NotStarted starts the one commit; Failed retries on an
                // explicit user action only.
                CommitPhase::NotStarted | CommitPhase::Failed { .. } => {
                    Ok(BookingState::Confirming {
                        department,
                        doctor,
                        form,
                        commit: CommitPhase::InFlight,
                    })
                }
            },

            (
                BookingState::Confirming { department, doctor, form, commit },
                BookingEvent::CommitSucceeded(appointment),
            ) => match commit {
                CommitPhase::InFlight => Ok(BookingState::Success { appointment }),
                _ => {
                    let state = BookingState::Confirming { department, doctor, form, commit };
                    Err(invalid(&state, "commit_succeeded"))
                }
            },

            (
                BookingState::Confirming { department, doctor, form, commit },
                BookingEvent::CommitFailed(reason),
            ) => match commit {
                CommitPhase::InFlight => Ok(BookingState::Confirming {
                    department,
                    doctor,
                    form,
                    commit: CommitPhase::Failed { reason },
                }),
                _ => {
                    let state = BookingState::Confirming { department, doctor, form, commit };
                    Err(invalid(&state, "commit_failed"))
                }
            },

            (
                BookingState::Confirming { department, doctor, form, commit },
                BookingEvent::Back,
            ) => match commit {
                CommitPhase::InFlight => Err(BookingError::CommitInFlight),
                _ => Ok(BookingState::ScheduleAndInfo { department, doctor, form }),
            },

            // Full restart from the terminal state only.
            (BookingState::Success { .. }, BookingEvent::Restart) => {
                Ok(BookingState::SelectDepartment)
            }

            (state, event) => {
                let err = invalid(&state, event_name(&event));
                Err(err)
            }
        }
    }

    /// Assemble the appointment to commit. Fields are copied verbatim from
    /// the gate-validated form; no re-validation happens here.
    pub fn draft(&self) -> Option<AppointmentDraft> {
        let BookingState::Confirming { department, doctor, form, .. } = self else {
            return None;
        };
        let time = form.time.clone()?;
        Some(AppointmentDraft {
            doctor_id: doctor.id,
            doctor_name: doctor.name.clone(),
            department: *department,
            patient_name: form.info.name.clone(),
            patient_tc: form.info.tc.clone(),
            patient_age: form.info.age.clone(),
            date: form.date,
            time,
            symptoms: form.info.symptoms.clone().filter(|s| !s.trim().is_empty()),
        })
    }
}

/// The ScheduleAndInfo→Confirming gate: time slot chosen, name non-empty,
/// national identifier exactly 11 digits, age present.
fn validation_gate(form: &ScheduleForm) -> Result<(), BookingError> {
    if form.time.is_none() {
        return Err(BookingError::IncompleteForm("time slot not selected".to_string()));
    }
    if form.info.name.trim().is_empty() {
        return Err(BookingError::IncompleteForm("patient name is empty".to_string()));
    }
    if !tc_regex().is_match(&form.info.tc) {
        return Err(BookingError::IncompleteForm(
            "national identifier must be exactly 11 digits".to_string(),
        ));
    }
    if form.info.age.trim().is_empty() {
        return Err(BookingError::IncompleteForm("patient age is empty".to_string()));
    }
    Ok(())
}

fn prefill(locked: Option<&PatientIdentity>) -> PatientInfo {
    match locked {
        Some(identity) => PatientInfo {
            name: identity.name.clone(),
            tc: identity.tc.clone(),
            age: identity.age.clone(),
            symptoms: None,
        },
        None => PatientInfo::default(),
    }
}

fn apply_edit(
    info: &mut PatientInfo,
    edit: PatientInfoEdit,
    locked: Option<&PatientIdentity>,
) -> Result<(), BookingError> {
    if locked.is_some() && (edit.name.is_some() || edit.tc.is_some() || edit.age.is_some()) {
        return Err(BookingError::LockedFieldEdit);
    }
    if let Some(name) = edit.name {
        info.name = name;
    }
    if let Some(tc) = edit.tc {
        info.tc = tc;
    }
    if let Some(age) = edit.age {
        info.age = age;
    }
    if let Some(symptoms) = edit.symptoms {
        info.symptoms = if symptoms.trim().is_empty() {
            None
        } else {
            Some(symptoms)
        };
    }
    Ok(())
}

fn invalid(state: &BookingState, event: &'static str) -> BookingError {
    BookingError::InvalidTransition {
        state: state.name(),
        event,
    }
}

fn event_name(event: &BookingEvent) -> &'static str {
    match event {
        BookingEvent::DepartmentChosen(_) => "department_chosen",
        BookingEvent::DoctorsLoaded { .. } => "doctors_loaded",
        BookingEvent::DoctorChosen(_) => "doctor_chosen",
        BookingEvent::DateChosen(_) => "date_chosen",
        BookingEvent::SlotChosen(_) => "slot_chosen",
        BookingEvent::InfoEdited(_) => "info_edited",
        BookingEvent::Advance => "advance",
        BookingEvent::CommitStarted => "commit_started",
        BookingEvent::CommitSucceeded(_) => "commit_succeeded",
        BookingEvent::CommitFailed(_) => "commit_failed",
        BookingEvent::Back => "back",
        BookingEvent::Restart => "restart",
    }
}
