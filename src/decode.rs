use crate::builder::{CellKey, VarIndex};
use crate::data::{
    Calendar, Hall, HallAllocation, HallIndex, Module, SlotRow, TimetableEntry, Variant,
};
use crate::error::TimetableError;
use crate::model::VarId;
use log::{debug, trace};

/// Splits `demand` students over halls in proportion to their capacity.
///
/// Every hall but the last gets `floor(demand · cap / Σcap)`; the last takes
/// the remainder. If that remainder does not fit the last hall, the excess
/// moves to earlier halls with free seats, in order. Returns `None` when the
/// halls cannot seat `demand` at all.
pub fn allocate_students(demand: u32, capacities: &[u32]) -> Option<Vec<u32>> {
    let total: u64 = capacities.iter().map(|&c| c as u64).sum();
    let (&last_cap, head) = capacities.split_last()?;
    if (demand as u64) > total {
        return None;
    }

    let mut allocs: Vec<u32> = head
        .iter()
        .map(|&cap| (demand as u64 * cap as u64 / total) as u32)
        .collect();
    let remainder = demand - allocs.iter().sum::<u32>();
    let mut excess = remainder.saturating_sub(last_cap);
    allocs.push(remainder - excess);

    for (alloc, &cap) in allocs.iter_mut().zip(head) {
        if excess == 0 {
            break;
        }
        let moved = (cap - *alloc).min(excess);
        *alloc += moved;
        excess -= moved;
    }
    debug_assert_eq!(excess, 0);
    Some(allocs)
}

/// Reads a solved point back into one [`TimetableEntry`] per module.
pub struct Decoder<'a> {
    index: &'a VarIndex,
    modules: &'a [Module],
    halls: &'a [Hall],
    calendar: &'a Calendar,
}

impl<'a> Decoder<'a> {
    pub fn new(
        index: &'a VarIndex,
        modules: &'a [Module],
        halls: &'a [Hall],
        calendar: &'a Calendar,
    ) -> Self {
        Self {
            index,
            modules,
            halls,
            calendar,
        }
    }

    /// One entry per module, in input order.
    pub fn decode(&self, values: &[i64]) -> Result<Vec<TimetableEntry>, TimetableError> {
        let entries = self
            .modules
            .iter()
            .enumerate()
            .map(|(m, module)| self.decode_module(m, module, values))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Decoded {} timetable entries.", entries.len());
        Ok(entries)
    }

    fn decode_module(
        &self,
        m: usize,
        module: &Module,
        values: &[i64],
    ) -> Result<TimetableEntry, TimetableError> {
        let vars = self.index.module(m);
        let day = read_index(values, vars.day, self.calendar.num_days(), &module.code, "day")?;
        let start_slot = read_index(
            values,
            vars.slot,
            self.calendar.slots_per_day() as usize,
            &module.code,
            "slot",
        )? as u32;

        let halls = match (self.index.variant(), vars.hall) {
            (Variant::SplitHallExam, _) => self.split_halls(m, module, day, start_slot, values)?,
            (_, Some(hall_var)) => {
                let h = read_index(values, hall_var, self.halls.len(), &module.code, "hall")?;
                vec![self.allocation(h, module.students)]
            }
            (_, None) => {
                return Err(TimetableError::InvariantViolation(format!(
                    "module {} has no hall variable",
                    module.code
                )));
            }
        };

        let entry = TimetableEntry {
            code: module.code.clone(),
            day: self.calendar.day_label(day).to_string(),
            day_index: day,
            start_slot,
            end_slot: start_slot + vars.duration,
            duration: vars.duration,
            halls,
            students: module.students,
            department: module.department.clone(),
            semester: module.semester,
            is_common: module.is_common,
        };
        self.check_entry(&entry)?;
        trace!(
            "{}: {} slot {}..{} in {} hall(s)",
            entry.code,
            entry.day,
            entry.start_slot,
            entry.end_slot,
            entry.halls.len()
        );
        Ok(entry)
    }

    fn split_halls(
        &self,
        m: usize,
        module: &Module,
        day: usize,
        slot: u32,
        values: &[i64],
    ) -> Result<Vec<HallAllocation>, TimetableError> {
        let used: Vec<HallIndex> = (0..self.halls.len())
            .filter(|&h| {
                let key = CellKey {
                    module: m,
                    day,
                    slot,
                    hall: h,
                };
                self.index
                    .presence(key)
                    .is_some_and(|p| values[p.index()] == 1)
            })
            .collect();
        let capacities: Vec<u32> = used.iter().map(|&h| self.halls[h].capacity).collect();
        let allocs = allocate_students(module.students, &capacities).ok_or_else(|| {
            TimetableError::InvariantViolation(format!(
                "module {} needs {} seats but its halls hold {}",
                module.code,
                module.students,
                capacities.iter().map(|&c| c as u64).sum::<u64>()
            ))
        })?;
        Ok(used
            .into_iter()
            .zip(allocs)
            .map(|(h, n)| self.allocation(h, n))
            .collect())
    }

    fn allocation(&self, hall: HallIndex, students: u32) -> HallAllocation {
        HallAllocation {
            hall: self.halls[hall].name.clone(),
            hall_index: hall,
            allocated_students: students,
        }
    }

    fn check_entry(&self, entry: &TimetableEntry) -> Result<(), TimetableError> {
        if entry.allocated_total() != entry.students {
            return Err(TimetableError::InvariantViolation(format!(
                "module {} allocated {} of {} students",
                entry.code,
                entry.allocated_total(),
                entry.students
            )));
        }
        if let Some(a) = entry
            .halls
            .iter()
            .find(|a| a.allocated_students > self.halls[a.hall_index].capacity)
        {
            return Err(TimetableError::InvariantViolation(format!(
                "module {} puts {} students in {} (capacity {})",
                entry.code, a.allocated_students, a.hall, self.halls[a.hall_index].capacity
            )));
        }
        if entry.end_slot > self.calendar.slots_per_day() {
            return Err(TimetableError::InvariantViolation(format!(
                "module {} runs past the end of the day",
                entry.code
            )));
        }
        Ok(())
    }
}

fn read_index(
    values: &[i64],
    var: VarId,
    len: usize,
    code: &str,
    what: &str,
) -> Result<usize, TimetableError> {
    let v = values[var.index()];
    usize::try_from(v)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| {
            TimetableError::InvariantViolation(format!("module {code} has {what} {v} out of range"))
        })
}

/// One row per occupied slot, for consumers that want a flat grid.
pub fn expand_slots(entries: &[TimetableEntry]) -> Vec<SlotRow> {
    entries
        .iter()
        .flat_map(|e| {
            e.halls.iter().flat_map(move |a| {
                (e.start_slot..e.end_slot).map(move |slot| SlotRow {
                    code: e.code.clone(),
                    day: e.day.clone(),
                    day_index: e.day_index,
                    hall: a.hall.clone(),
                    hall_index: a.hall_index,
                    slot,
                    duration: e.duration,
                    students: a.allocated_students,
                    department: e.department.clone(),
                    semester: e.semester,
                    is_common: e.is_common,
                })
            })
        })
        .collect()
}
