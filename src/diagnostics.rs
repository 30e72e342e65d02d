use crate::data::{Calendar, Diagnostics, Hall, Module, Variant};
use log::{info, warn};

/// Capacity-versus-demand sanity figures. Never decides success.
pub fn compute(
    modules: &[Module],
    halls: &[Hall],
    calendar: &Calendar,
    variant: Variant,
) -> Diagnostics {
    let duration = |m: &Module| if variant.is_exam() { 1 } else { m.duration };
    Diagnostics {
        module_count: modules.len(),
        hall_count: halls.len(),
        day_count: calendar.num_days(),
        slots_per_day: calendar.slots_per_day(),
        required_slot_capacity: modules.iter().map(|m| duration(m) as u64).sum(),
        available_slot_capacity: calendar.num_cells() as u64 * halls.len() as u64,
        total_students: modules.iter().map(|m| m.students as u64).sum(),
        largest_hall_capacity: halls.iter().map(|h| h.capacity).max().unwrap_or(0),
        largest_class_size: modules.iter().map(|m| m.students).max().unwrap_or(0),
        max_duration: modules.iter().map(duration).max().unwrap_or(0),
        min_duration: modules.iter().map(duration).min().unwrap_or(0),
    }
}

/// Logs the figures and warns about shortfalls that make a solve hopeless.
pub fn report(diag: &Diagnostics, variant: Variant) {
    info!(
        "[DIAGNOSTICS] {} modules, {} halls, {} days x {} slots; required slot-capacity {} of {} available",
        diag.module_count,
        diag.hall_count,
        diag.day_count,
        diag.slots_per_day,
        diag.required_slot_capacity,
        diag.available_slot_capacity
    );
    info!(
        "[DIAGNOSTICS] largest hall {}, largest class {}, durations {}..={}",
        diag.largest_hall_capacity, diag.largest_class_size, diag.min_duration, diag.max_duration
    );
    for warning in warnings(diag, variant) {
        warn!("[DIAGNOSTICS] {}", warning);
    }
}

/// Human-readable reasons the instance is likely infeasible.
pub fn warnings(diag: &Diagnostics, variant: Variant) -> Vec<String> {
    let mut out = Vec::new();
    if diag.required_slot_capacity > diag.available_slot_capacity {
        out.push(format!(
            "required slot-capacity {} exceeds available {}",
            diag.required_slot_capacity, diag.available_slot_capacity
        ));
    }
    if !variant.splits_halls() && diag.largest_class_size > diag.largest_hall_capacity {
        out.push(format!(
            "largest class ({}) does not fit the largest hall ({})",
            diag.largest_class_size, diag.largest_hall_capacity
        ));
    }
    out
}
