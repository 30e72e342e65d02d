use crate::data::{Calendar, Hall, Module, Variant};
use crate::error::InputError;
use std::collections::HashSet;

/// Rejects input the model builder cannot give a meaning to.
///
/// Stops at the first violation. Capacity shortfalls are not checked here:
/// they are a normal infeasible outcome of the solve.
pub fn validate_input(
    modules: &[Module],
    halls: &[Hall],
    calendar: &Calendar,
    variant: Variant,
) -> Result<(), InputError> {
    if calendar.num_days() == 0 || calendar.slots_per_day() == 0 {
        return Err(InputError::EmptyCalendar);
    }
    if halls.is_empty() {
        return Err(InputError::NoHalls);
    }

    let mut hall_names = HashSet::new();
    for hall in halls {
        if !hall_names.insert(hall.name.as_str()) {
            return Err(InputError::DuplicateHall(hall.name.clone()));
        }
        if hall.capacity == 0 {
            return Err(InputError::NonPositiveCapacity(hall.name.clone()));
        }
    }

    let mut codes = HashSet::new();
    for module in modules {
        if !codes.insert(module.code.as_str()) {
            return Err(InputError::DuplicateModule(module.code.clone()));
        }
        if module.students == 0 {
            return Err(InputError::NonPositiveStudents(module.code.clone()));
        }
        if module.duration == 0 {
            return Err(InputError::NonPositiveDuration(module.code.clone()));
        }
        // exams are single-slot whatever the record says
        if !variant.is_exam() && module.duration > calendar.slots_per_day() {
            return Err(InputError::DurationExceedsDay {
                code: module.code.clone(),
                duration: module.duration,
                slots_per_day: calendar.slots_per_day(),
            });
        }
    }
    Ok(())
}
