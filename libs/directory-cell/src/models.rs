// libs/directory-cell/src/models.rs
use serde::{Deserialize, Serialize};

use shared_models::Department;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub department: Department,
    pub image: String,
    pub experience: i32,
    pub rating: f32,
}

/// One offerable appointment time in the fixed daily template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    pub time: String,
    pub available: bool,
}

/// Row shape for seeding: the store assigns ids on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDoctor {
    pub name: String,
    pub department: Department,
    pub image: String,
    pub experience: i32,
    pub rating: f32,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Default roster inserted when the doctors table is empty.
pub fn seed_roster() -> Vec<SeedDoctor> {
    let entries = [
        ("Prof. Dr. Ahmet Yılmaz", Department::Cardiology, 1, 15, 4.9),
        ("Uzm. Dr. Ayşe Demir", Department::InternalMedicine, 2, 8, 4.7),
        ("Op. Dr. Mehmet Öz", Department::Orthopedics, 3, 12, 4.8),
        ("Dr. Zeynep Kaya", Department::Pediatrics, 4, 5, 4.9),
        ("Uzm. Dr. Caner Erkin", Department::Dermatology, 5, 10, 4.6),
        ("Prof. Dr. Selin Şahin", Department::Neurology, 6, 20, 5.0),
        ("Op. Dr. Burak Yılmaz", Department::Ent, 7, 7, 4.5),
    ];

    entries
        .into_iter()
        .map(|(name, department, seed, experience, rating)| SeedDoctor {
            name: name.to_string(),
            department,
            image: format!("https://picsum.photos/200/200?random={}", seed),
            experience,
            rating,
        })
        .collect()
}

/// The fixed daily slot template. Slot times are unique and chronologically
/// ordered; booking never mutates availability.
pub fn daily_slot_template() -> Vec<TimeSlot> {
    let entries = [
        ("09:00", true),
        ("09:30", true),
        ("10:00", false),
        ("10:30", true),
        ("11:00", true),
        ("11:30", false),
        ("13:00", true),
        ("13:30", true),
        ("14:00", true),
        ("14:30", true),
        ("15:00", true),
        ("15:30", false),
        ("16:00", true),
    ];

    entries
        .into_iter()
        .map(|(time, available)| TimeSlot {
            time: time.to_string(),
            available,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_template_is_unique_and_ordered() {
        let slots = daily_slot_template();
        for pair in slots.windows(2) {
            assert!(pair[0].time < pair[1].time, "{} !< {}", pair[0].time, pair[1].time);
        }
    }

    #[test]
    fn seed_roster_covers_seven_departments() {
        let roster = seed_roster();
        assert_eq!(roster.len(), 7);
        let mut departments: Vec<_> = roster.iter().map(|d| d.department).collect();
        departments.dedup();
        assert_eq!(departments.len(), 7);
    }
}
