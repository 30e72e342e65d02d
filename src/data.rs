use serde::{Deserialize, Serialize};
use std::fmt;

// Type aliases for clarity
pub type DayIndex = usize;
pub type SlotIndex = u32;
pub type HallIndex = usize;

/// A course or exam that needs exactly one placement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub code: String,
    pub students: u32,
    /// Consecutive slots required. Exam variants always treat this as 1.
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub semester: Option<u32>,
    #[serde(default)]
    pub is_common: bool,
}

fn default_duration() -> u32 {
    1
}

impl Module {
    pub fn new(code: impl Into<String>, students: u32) -> Self {
        Self {
            code: code.into(),
            students,
            duration: 1,
            department: None,
            semester: None,
            is_common: false,
        }
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_semester(mut self, semester: u32) -> Self {
        self.semester = Some(semester);
        self
    }

    pub fn common(mut self) -> Self {
        self.is_common = true;
        self
    }
}

/// A room with a fixed seating capacity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Hall {
    pub name: String,
    pub capacity: u32,
}

impl Hall {
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// Ordered grid of days, each split into `slots_per_day` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    days: Vec<String>,
    slots_per_day: u32,
}

impl Calendar {
    pub fn new(days: Vec<String>, slots_per_day: u32) -> Self {
        Self {
            days,
            slots_per_day,
        }
    }

    pub fn num_days(&self) -> usize {
        self.days.len()
    }

    pub fn slots_per_day(&self) -> u32 {
        self.slots_per_day
    }

    pub fn day_label(&self, day: DayIndex) -> &str {
        &self.days[day]
    }

    /// Number of (day, slot) cells.
    pub fn num_cells(&self) -> usize {
        self.days.len() * self.slots_per_day as usize
    }

    /// Every (day, slot) cell in calendar order.
    pub fn cells(&self) -> impl Iterator<Item = (DayIndex, SlotIndex)> + '_ {
        (0..self.days.len()).flat_map(move |d| (0..self.slots_per_day).map(move |s| (d, s)))
    }
}

/// Which scheduling model to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// One (day, slot, hall) cell per exam, no splitting.
    SingleHallExam,
    /// One (day, slot) per exam, spread over as many halls as needed.
    SplitHallExam,
    /// One (day, hall) per class, occupying `duration` contiguous slots.
    DurationClass,
}

impl Variant {
    pub fn is_exam(self) -> bool {
        matches!(self, Variant::SingleHallExam | Variant::SplitHallExam)
    }

    pub fn splits_halls(self) -> bool {
        self == Variant::SplitHallExam
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::SingleHallExam => "single-hall exam",
            Variant::SplitHallExam => "split-hall exam",
            Variant::DurationClass => "duration class",
        };
        f.write_str(name)
    }
}

/// Outward status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Optimal,
    Feasible,
    NoSolution,
}

impl Status {
    pub fn has_solution(self) -> bool {
        matches!(self, Status::Optimal | Status::Feasible)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Optimal => "OPTIMAL",
            Status::Feasible => "FEASIBLE",
            Status::NoSolution => "NO_SOLUTION",
        };
        f.write_str(name)
    }
}

/// Students of one module seated in one hall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HallAllocation {
    pub hall: String,
    pub hall_index: HallIndex,
    pub allocated_students: u32,
}

/// Decoded placement of a single module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub code: String,
    pub day: String,
    pub day_index: DayIndex,
    pub start_slot: SlotIndex,
    /// Exclusive.
    pub end_slot: SlotIndex,
    pub duration: u32,
    pub halls: Vec<HallAllocation>,
    pub students: u32,
    pub department: Option<String>,
    pub semester: Option<u32>,
    pub is_common: bool,
}

impl TimetableEntry {
    pub fn occupies(&self, day: DayIndex, slot: SlotIndex) -> bool {
        self.day_index == day && (self.start_slot..self.end_slot).contains(&slot)
    }

    pub fn uses_hall(&self, hall: HallIndex) -> bool {
        self.halls.iter().any(|a| a.hall_index == hall)
    }

    pub fn allocated_total(&self) -> u32 {
        self.halls.iter().map(|a| a.allocated_students).sum()
    }
}

/// One row per occupied slot of a class, for consumers that want a flat grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRow {
    pub code: String,
    pub day: String,
    pub day_index: DayIndex,
    pub hall: String,
    pub hall_index: HallIndex,
    pub slot: SlotIndex,
    pub duration: u32,
    pub students: u32,
    pub department: Option<String>,
    pub semester: Option<u32>,
    pub is_common: bool,
}

/// Feasibility sanity statistics. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub module_count: usize,
    pub hall_count: usize,
    pub day_count: usize,
    pub slots_per_day: u32,
    pub required_slot_capacity: u64,
    pub available_slot_capacity: u64,
    pub total_students: u64,
    pub largest_hall_capacity: u32,
    pub largest_class_size: u32,
    pub max_duration: u32,
    pub min_duration: u32,
}

/// The final output of a run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableResult {
    pub status: Status,
    /// Why no timetable was produced (`infeasible` or `unknown`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Soft-overlap count of the returned timetable, when the model had an objective.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<i64>,
    pub timetable: Vec<TimetableEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expanded_slots: Vec<SlotRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

impl TimetableResult {
    pub fn empty(status: Status) -> Self {
        Self {
            status,
            reason: None,
            objective: None,
            timetable: Vec::new(),
            expanded_slots: Vec::new(),
            diagnostics: None,
        }
    }
}
