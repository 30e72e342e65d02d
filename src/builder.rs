use crate::data::{Calendar, DayIndex, Hall, HallIndex, Module, SlotIndex, Variant};
use crate::encoding::{self, OptionalInterval};
use crate::model::{LinearExpr, Literal, Model, VarId};
use itertools::Itertools;
use log::{debug, info, trace};

/// Dense N-dimensional table of variables, row-major.
#[derive(Debug, Clone)]
pub struct Grid<const N: usize> {
    dims: [usize; N],
    vars: Vec<VarId>,
}

impl<const N: usize> Grid<N> {
    fn with_capacity(dims: [usize; N]) -> Self {
        Self {
            dims,
            vars: Vec::with_capacity(dims.iter().product()),
        }
    }

    fn offset(&self, key: [usize; N]) -> usize {
        key.iter()
            .zip(self.dims.iter())
            .fold(0, |acc, (&k, &dim)| {
                debug_assert!(k < dim, "grid key out of range");
                acc * dim + k
            })
    }

    pub fn get(&self, key: [usize; N]) -> VarId {
        self.vars[self.offset(key)]
    }

    pub fn dims(&self) -> [usize; N] {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    fn push(&mut self, var: VarId) {
        self.vars.push(var);
    }
}

/// Integer placement variables of one module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleVars {
    pub day: VarId,
    /// Start slot.
    pub slot: VarId,
    /// Absent in the split-hall variant, where halls are read from presence.
    pub hall: Option<VarId>,
    /// Slots occupied; 1 for exams.
    pub duration: u32,
}

/// Composite key of a presence indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub module: usize,
    pub day: DayIndex,
    /// Ignored by the class variant, whose presence is per (day, hall).
    pub slot: SlotIndex,
    pub hall: HallIndex,
}

/// Same-department overlap counter between two modules at one (day, slot).
#[derive(Debug, Clone, Copy)]
pub struct OverlapIndicator {
    pub first: usize,
    pub second: usize,
    pub day: DayIndex,
    pub slot: SlotIndex,
    pub var: VarId,
}

/// Ordering indicator of a pair sharing a (day, hall) pool.
#[derive(Debug, Clone, Copy)]
pub struct PoolOrdering {
    pub day: DayIndex,
    pub hall: HallIndex,
    pub first: usize,
    pub second: usize,
    /// True when `first` runs before `second`.
    pub var: VarId,
}

/// Ordering indicators of a same-department, same-semester pair on one day.
#[derive(Debug, Clone, Copy)]
pub struct Separation {
    pub day: DayIndex,
    pub first: usize,
    pub second: usize,
    pub first_before: VarId,
    pub second_before: VarId,
}

/// Handle to every variable the builder created. Read-only after the build.
#[derive(Debug, Clone)]
pub struct VarIndex {
    variant: Variant,
    pub modules: Vec<ModuleVars>,
    /// `[module][day][slot][hall]`, exam variants.
    cell_presence: Option<Grid<4>>,
    /// `[module][day][hall]`, class variant.
    day_hall_presence: Option<Grid<3>>,
    /// `[module][day][slot]`, exam variants: assigned at (day, slot) in any hall.
    slot_assigned: Option<Grid<3>>,
    /// `[module][day]`, class variant: present on the day in any hall.
    day_presence: Option<Grid<2>>,
    pub overlaps: Vec<OverlapIndicator>,
    pub orderings: Vec<PoolOrdering>,
    pub separations: Vec<Separation>,
}

impl VarIndex {
    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn module(&self, module: usize) -> &ModuleVars {
        &self.modules[module]
    }

    /// Presence indicator of `key`, in whichever granularity the variant uses.
    pub fn presence(&self, key: CellKey) -> Option<VarId> {
        match (&self.cell_presence, &self.day_hall_presence) {
            (Some(grid), _) => Some(grid.get([key.module, key.day, key.slot as usize, key.hall])),
            (None, Some(grid)) => Some(grid.get([key.module, key.day, key.hall])),
            (None, None) => None,
        }
    }

    pub fn slot_assigned(&self, module: usize, day: DayIndex, slot: SlotIndex) -> Option<VarId> {
        self.slot_assigned
            .as_ref()
            .map(|g| g.get([module, day, slot as usize]))
    }

    pub fn day_presence(&self, module: usize, day: DayIndex) -> Option<VarId> {
        self.day_presence.as_ref().map(|g| g.get([module, day]))
    }
}

/// A complete model and its variable index.
#[derive(Debug, Clone)]
pub struct BuiltModel {
    pub model: Model,
    pub index: VarIndex,
}

/// Composes the encoding library into one of the three scheduling variants.
///
/// Variable count is O(modules × days × slots × halls) for the exam variants
/// and O(modules × days × halls) plus O(modules² × days × halls) ordering
/// indicators for the class variant.
pub struct ModelBuilder<'a> {
    modules: &'a [Module],
    halls: &'a [Hall],
    calendar: &'a Calendar,
    variant: Variant,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(
        modules: &'a [Module],
        halls: &'a [Hall],
        calendar: &'a Calendar,
        variant: Variant,
    ) -> Self {
        Self {
            modules,
            halls,
            calendar,
            variant,
        }
    }

    pub fn build(&self) -> BuiltModel {
        info!(
            "Building {} model with {} modules, {} halls, {} days x {} slots...",
            self.variant,
            self.modules.len(),
            self.halls.len(),
            self.calendar.num_days(),
            self.calendar.slots_per_day()
        );
        let mut model = Model::new();
        let mut index = match self.variant {
            Variant::SingleHallExam | Variant::SplitHallExam => self.build_exam(&mut model),
            Variant::DurationClass => self.build_class(&mut model),
        };
        if self.variant.is_exam() {
            index.overlaps = self.add_overlap_objective(&mut model, &index);
        }
        info!(
            "Model ready: {} variables, {} constraints, {} soft-overlap indicators.",
            model.num_vars(),
            model.num_constraints(),
            index.overlaps.len()
        );
        BuiltModel { model, index }
    }

    fn num_days(&self) -> usize {
        self.calendar.num_days()
    }

    fn num_slots(&self) -> usize {
        self.calendar.slots_per_day() as usize
    }

    fn fits(&self, module: &Module, hall: &Hall) -> bool {
        hall.capacity >= module.students
    }

    fn build_exam(&self, model: &mut Model) -> VarIndex {
        let (nm, nd, ns, nh) = (
            self.modules.len(),
            self.num_days(),
            self.num_slots(),
            self.halls.len(),
        );
        let split = self.variant.splits_halls();
        let mut cell_presence = Grid::with_capacity([nm, nd, ns, nh]);
        let mut slot_assigned = Grid::with_capacity([nm, nd, ns]);
        let mut module_vars = Vec::with_capacity(nm);

        for module in self.modules {
            let code = &module.code;
            let day = model.new_int(format!("day_{code}"), 0, nd as i64 - 1);
            let slot = model.new_int(format!("slot_{code}"), 0, ns as i64 - 1);
            let hall = (!split).then(|| model.new_int(format!("hall_{code}"), 0, nh as i64 - 1));

            let mut placements = Vec::with_capacity(nd * ns * nh);
            let mut assigned_cells = Vec::with_capacity(nd * ns);
            // (indicator, day, slot, hall) of whichever set is exactly-one
            let mut choices = Vec::with_capacity(nd * ns * nh);
            for (d, s) in self.calendar.cells() {
                let mut in_halls = Vec::with_capacity(nh);
                for (h, hall_rec) in self.halls.iter().enumerate() {
                    let p = model.new_bool(format!("pres_{code}_d{d}_s{s}_h{h}"));
                    cell_presence.push(p);
                    in_halls.push(p);
                    if !split {
                        choices.push((p, d, s, h));
                        if !self.fits(module, hall_rec) {
                            encoding::forbid(model, p);
                        }
                    }
                }
                placements.extend_from_slice(&in_halls);

                let assigned = model.new_bool(format!("dp_{code}_d{d}_s{s}"));
                slot_assigned.push(assigned);
                assigned_cells.push(assigned);
                encoding::link_aggregate(model, assigned, &in_halls);
                if split {
                    choices.push((assigned, d, s, 0));
                    let seats: Vec<(VarId, i64)> = in_halls
                        .iter()
                        .zip(self.halls)
                        .map(|(&p, h)| (p, h.capacity as i64))
                        .collect();
                    encoding::cover_if(model, assigned, &seats, module.students as i64);
                }
            }

            if split {
                encoding::exactly_one(model, &assigned_cells);
            } else {
                encoding::exactly_one(model, &placements);
            }
            let on_days: Vec<(VarId, i64)> =
                choices.iter().map(|&(p, d, _, _)| (p, d as i64)).collect();
            let at_slots: Vec<(VarId, i64)> =
                choices.iter().map(|&(p, _, s, _)| (p, s as i64)).collect();
            encoding::link_selection(model, day, &on_days);
            encoding::link_selection(model, slot, &at_slots);
            if let Some(hall_var) = hall {
                let in_hall: Vec<(VarId, i64)> =
                    choices.iter().map(|&(p, _, _, h)| (p, h as i64)).collect();
                encoding::link_selection(model, hall_var, &in_hall);
            }
            module_vars.push(ModuleVars {
                day,
                slot,
                hall,
                duration: 1,
            });
        }

        // at most one exam per hall per (day, slot)
        for (d, s) in self.calendar.cells() {
            for h in 0..nh {
                let cell: Vec<VarId> = (0..nm)
                    .map(|m| cell_presence.get([m, d, s as usize, h]))
                    .collect();
                encoding::at_most_one(model, &cell);
            }
        }
        debug!("Exam placement grid: {} presence indicators.", cell_presence.len());

        VarIndex {
            variant: self.variant,
            modules: module_vars,
            cell_presence: Some(cell_presence),
            day_hall_presence: None,
            slot_assigned: Some(slot_assigned),
            day_presence: None,
            overlaps: Vec::new(),
            orderings: Vec::new(),
            separations: Vec::new(),
        }
    }

    fn build_class(&self, model: &mut Model) -> VarIndex {
        let (nm, nd, nh) = (self.modules.len(), self.num_days(), self.halls.len());
        let slots = self.calendar.slots_per_day() as i64;
        let mut presence = Grid::with_capacity([nm, nd, nh]);
        let mut day_presence = Grid::with_capacity([nm, nd]);
        let mut module_vars = Vec::with_capacity(nm);

        for module in self.modules {
            let code = &module.code;
            let day = model.new_int(format!("day_{code}"), 0, nd as i64 - 1);
            let hall = model.new_int(format!("hall_{code}"), 0, nh as i64 - 1);
            // the interval always fits inside the day
            let slot = model.new_int(format!("slot_{code}"), 0, slots - module.duration as i64);

            let mut placements = Vec::with_capacity(nd * nh);
            let mut on_days = Vec::with_capacity(nd * nh);
            let mut in_hall = Vec::with_capacity(nd * nh);
            for d in 0..nd {
                let mut in_halls = Vec::with_capacity(nh);
                for (h, hall_rec) in self.halls.iter().enumerate() {
                    let p = model.new_bool(format!("pres_{code}_d{d}_h{h}"));
                    presence.push(p);
                    in_halls.push(p);
                    on_days.push((p, d as i64));
                    in_hall.push((p, h as i64));
                    if !self.fits(module, hall_rec) {
                        encoding::forbid(model, p);
                    }
                }
                placements.extend_from_slice(&in_halls);

                let on_day = model.new_bool(format!("daypres_{code}_d{d}"));
                day_presence.push(on_day);
                encoding::link_aggregate(model, on_day, &in_halls);
            }
            encoding::exactly_one(model, &placements);
            encoding::link_selection(model, day, &on_days);
            encoding::link_selection(model, hall, &in_hall);
            module_vars.push(ModuleVars {
                day,
                slot,
                hall: Some(hall),
                duration: module.duration,
            });
        }

        let mut orderings = Vec::new();
        for d in 0..nd {
            for h in 0..nh {
                // modules that cannot sit in this hall never join its pool
                let members: Vec<usize> = (0..nm)
                    .filter(|&m| self.fits(&self.modules[m], &self.halls[h]))
                    .collect();
                let intervals: Vec<OptionalInterval> = members
                    .iter()
                    .map(|&m| OptionalInterval {
                        start: module_vars[m].slot,
                        duration: module_vars[m].duration as i64,
                        presence: Literal::pos(presence.get([m, d, h])),
                    })
                    .collect();
                let pairs = encoding::no_overlap(model, &intervals, &format!("pool_d{d}_h{h}"));
                orderings.extend(pairs.into_iter().map(|(i, j, var)| PoolOrdering {
                    day: d,
                    hall: h,
                    first: members[i],
                    second: members[j],
                    var,
                }));
            }
        }
        trace!("Added {} pool ordering indicators.", orderings.len());

        let mut separations = Vec::new();
        for (i, j) in self.department_semester_pairs() {
            let (mi, mj) = (&module_vars[i], &module_vars[j]);
            for d in 0..nd {
                let a = OptionalInterval {
                    start: mi.slot,
                    duration: mi.duration as i64,
                    presence: Literal::pos(day_presence.get([i, d])),
                };
                let b = OptionalInterval {
                    start: mj.slot,
                    duration: mj.duration as i64,
                    presence: Literal::pos(day_presence.get([j, d])),
                };
                let name = format!(
                    "sep_{}_{}_d{d}",
                    self.modules[i].code, self.modules[j].code
                );
                let (first_before, second_before) =
                    encoding::separate_if_both(model, &a, &b, &name);
                separations.push(Separation {
                    day: d,
                    first: i,
                    second: j,
                    first_before,
                    second_before,
                });
            }
        }
        debug!(
            "Department separation: {} (pair, day) orderings.",
            separations.len()
        );

        VarIndex {
            variant: self.variant,
            modules: module_vars,
            cell_presence: None,
            day_hall_presence: Some(presence),
            slot_assigned: None,
            day_presence: Some(day_presence),
            overlaps: Vec::new(),
            orderings,
            separations,
        }
    }

    /// Unordered pairs of module indices sharing a department, by department name.
    fn department_pairs(&self) -> Vec<(usize, usize)> {
        self.modules
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.department.as_deref().map(|dept| (dept, i)))
            .into_group_map()
            .into_iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .flat_map(|(_, members)| members.into_iter().tuple_combinations::<(usize, usize)>())
            .collect()
    }

    /// Same-department pairs whose semesters are both known and equal.
    fn department_semester_pairs(&self) -> Vec<(usize, usize)> {
        self.department_pairs()
            .into_iter()
            .filter(|&(i, j)| {
                matches!(
                    (self.modules[i].semester, self.modules[j].semester),
                    (Some(a), Some(b)) if a == b
                )
            })
            .collect()
    }

    fn add_overlap_objective(&self, model: &mut Model, index: &VarIndex) -> Vec<OverlapIndicator> {
        let mut overlaps = Vec::new();
        for (i, j) in self.department_pairs() {
            for (d, s) in self.calendar.cells() {
                let a = index.slot_assigned(i, d, s);
                let b = index.slot_assigned(j, d, s);
                let (Some(a), Some(b)) = (a, b) else {
                    continue;
                };
                let name = format!(
                    "ov_{}_{}_d{d}_s{s}",
                    self.modules[i].code, self.modules[j].code
                );
                let var =
                    encoding::conjunction_indicator(model, Literal::pos(a), Literal::pos(b), name);
                overlaps.push(OverlapIndicator {
                    first: i,
                    second: j,
                    day: d,
                    slot: s,
                    var,
                });
            }
        }
        if overlaps.is_empty() {
            debug!("No department information; solving for feasibility only.");
        } else {
            model.minimise(LinearExpr::sum(overlaps.iter().map(|o| o.var)));
        }
        overlaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar(days: usize, slots: u32) -> Calendar {
        Calendar::new((0..days).map(|d| format!("D{d}")).collect(), slots)
    }

    /// Sets the primary placement of every exam and derives the auxiliaries.
    fn exam_point(built: &BuiltModel, placements: &[(usize, u32, Vec<usize>)]) -> Vec<i64> {
        let idx = &built.index;
        let mut values = vec![0; built.model.num_vars()];
        for (m, (d, s, halls)) in placements.iter().enumerate() {
            let vars = idx.module(m);
            values[vars.day.index()] = *d as i64;
            values[vars.slot.index()] = *s as i64;
            if let Some(hv) = vars.hall {
                values[hv.index()] = halls[0] as i64;
            }
            for &h in halls {
                let key = CellKey {
                    module: m,
                    day: *d,
                    slot: *s,
                    hall: h,
                };
                values[idx.presence(key).unwrap().index()] = 1;
            }
            values[idx.slot_assigned(m, *d, *s).unwrap().index()] = 1;
        }
        for ov in &idx.overlaps {
            let a = values[idx.slot_assigned(ov.first, ov.day, ov.slot).unwrap().index()];
            let b = values[idx.slot_assigned(ov.second, ov.day, ov.slot).unwrap().index()];
            values[ov.var.index()] = a * b;
        }
        values
    }

    fn class_point(built: &BuiltModel, placements: &[(usize, usize, u32)]) -> Vec<i64> {
        let idx = &built.index;
        let mut values = vec![0; built.model.num_vars()];
        for (m, &(d, h, s)) in placements.iter().enumerate() {
            let vars = idx.module(m);
            values[vars.day.index()] = d as i64;
            values[vars.hall.unwrap().index()] = h as i64;
            values[vars.slot.index()] = s as i64;
            let key = CellKey {
                module: m,
                day: d,
                slot: 0,
                hall: h,
            };
            values[idx.presence(key).unwrap().index()] = 1;
            values[idx.day_presence(m, d).unwrap().index()] = 1;
        }
        let start = |m: usize| placements[m].2 as i64;
        for o in &idx.orderings {
            values[o.var.index()] = (start(o.first) < start(o.second)) as i64;
        }
        for sep in &idx.separations {
            let shared = placements[sep.first].0 == sep.day && placements[sep.second].0 == sep.day;
            values[sep.first_before.index()] =
                (shared && start(sep.first) < start(sep.second)) as i64;
            values[sep.second_before.index()] =
                (shared && start(sep.second) < start(sep.first)) as i64;
        }
        values
    }

    #[test]
    fn grid_is_row_major() {
        let mut g = Grid::with_capacity([2, 3]);
        let mut m = Model::new();
        for i in 0..6 {
            g.push(m.new_bool(format!("v{i}")));
        }
        assert_eq!(g.get([1, 2]).index(), 5);
        assert_eq!(g.get([0, 1]).index(), 1);
        assert_eq!(g.dims(), [2, 3]);
    }

    #[test]
    fn single_hall_accepts_valid_and_rejects_double_booking() {
        let modules = vec![Module::new("A", 50), Module::new("B", 30)];
        let halls = vec![Hall::new("LT1", 100)];
        let cal = calendar(1, 2);
        let built = ModelBuilder::new(&modules, &halls, &cal, Variant::SingleHallExam).build();

        let good = exam_point(&built, &[(0, 0, vec![0]), (0, 1, vec![0])]);
        assert!(built.model.evaluate(&good));

        let clash = exam_point(&built, &[(0, 0, vec![0]), (0, 0, vec![0])]);
        assert!(!built.model.evaluate(&clash));
        assert!(built.model.objective().is_none());
    }

    #[test]
    fn single_hall_forbids_small_halls() {
        let modules = vec![Module::new("A", 150)];
        let halls = vec![Hall::new("H80", 80), Hall::new("H200", 200)];
        let cal = calendar(1, 1);
        let built = ModelBuilder::new(&modules, &halls, &cal, Variant::SingleHallExam).build();
        assert!(!built.model.evaluate(&exam_point(&built, &[(0, 0, vec![0])])));
        assert!(built.model.evaluate(&exam_point(&built, &[(0, 0, vec![1])])));
    }

    #[test]
    fn split_hall_needs_combined_capacity() {
        let modules = vec![Module::new("A", 150)];
        let halls = vec![Hall::new("H80", 80), Hall::new("H90", 90)];
        let cal = calendar(1, 1);
        let built = ModelBuilder::new(&modules, &halls, &cal, Variant::SplitHallExam).build();
        assert!(built.index.module(0).hall.is_none());

        assert!(built.model.evaluate(&exam_point(&built, &[(0, 0, vec![0, 1])])));
        assert!(!built.model.evaluate(&exam_point(&built, &[(0, 0, vec![1])])));
    }

    #[test]
    fn split_hall_keeps_cells_exclusive() {
        let modules = vec![Module::new("A", 50), Module::new("B", 50)];
        let halls = vec![Hall::new("H1", 60), Hall::new("H2", 60)];
        let cal = calendar(1, 1);
        let built = ModelBuilder::new(&modules, &halls, &cal, Variant::SplitHallExam).build();
        assert!(built.model.evaluate(&exam_point(&built, &[(0, 0, vec![0]), (0, 0, vec![1])])));
        assert!(!built.model.evaluate(&exam_point(&built, &[(0, 0, vec![0, 1]), (0, 0, vec![1])])));
    }

    #[test]
    fn objective_counts_same_department_overlaps() {
        let modules = vec![
            Module::new("A", 10).with_department("EE"),
            Module::new("B", 10).with_department("EE"),
            Module::new("C", 10).with_department("ME"),
        ];
        let halls = vec![Hall::new("H1", 50), Hall::new("H2", 50)];
        let cal = calendar(1, 2);
        let built = ModelBuilder::new(&modules, &halls, &cal, Variant::SingleHallExam).build();
        // one EE pair over two cells
        assert_eq!(built.index.overlaps.len(), 2);

        let clash = exam_point(&built, &[(0, 0, vec![0]), (0, 0, vec![1]), (0, 1, vec![0])]);
        assert!(built.model.evaluate(&clash));
        assert_eq!(built.model.objective_value(&clash), Some(1));

        let apart = exam_point(&built, &[(0, 0, vec![0]), (0, 1, vec![1]), (0, 0, vec![1])]);
        assert!(built.model.evaluate(&apart));
        assert_eq!(built.model.objective_value(&apart), Some(0));
    }

    #[test]
    fn class_rejects_overlap_in_same_hall() {
        let modules = vec![
            Module::new("A", 20).with_duration(2),
            Module::new("B", 20).with_duration(2),
        ];
        let halls = vec![Hall::new("LT1", 40)];
        let cal = calendar(1, 4);
        let built = ModelBuilder::new(&modules, &halls, &cal, Variant::DurationClass).build();
        assert_eq!(built.index.orderings.len(), 1);
        assert!(built.index.separations.is_empty());

        assert!(built.model.evaluate(&class_point(&built, &[(0, 0, 0), (0, 0, 2)])));
        assert!(!built.model.evaluate(&class_point(&built, &[(0, 0, 0), (0, 0, 1)])));
    }

    #[test]
    fn class_slot_domain_keeps_interval_in_day() {
        let modules = vec![Module::new("A", 20).with_duration(3)];
        let halls = vec![Hall::new("LT1", 40)];
        let cal = calendar(1, 4);
        let built = ModelBuilder::new(&modules, &halls, &cal, Variant::DurationClass).build();
        let slot = built.index.module(0).slot;
        assert_eq!(built.model.domain(slot).bounds(), (0, 1));
    }

    #[test]
    fn class_separates_same_department_semester_across_halls() {
        let modules = vec![
            Module::new("A", 20).with_duration(2).with_department("EC").with_semester(5),
            Module::new("B", 20).with_duration(2).with_department("EC").with_semester(5),
            Module::new("C", 20).with_duration(2).with_department("EC").with_semester(7),
        ];
        let halls = vec![Hall::new("LT1", 40), Hall::new("LT2", 40)];
        let cal = calendar(2, 4);
        let built = ModelBuilder::new(&modules, &halls, &cal, Variant::DurationClass).build();
        // only A-B share a semester, one record per day
        assert_eq!(built.index.separations.len(), 2);

        // different halls, overlapping slots, same day
        let overlapping = class_point(&built, &[(0, 0, 0), (0, 1, 1), (0, 0, 2)]);
        assert!(!built.model.evaluate(&overlapping));

        let ordered = class_point(&built, &[(0, 0, 0), (0, 1, 2), (0, 1, 0)]);
        assert!(built.model.evaluate(&ordered));

        let other_day = class_point(&built, &[(0, 0, 1), (1, 1, 1), (0, 1, 1)]);
        assert!(built.model.evaluate(&other_day));
    }

    #[test]
    fn class_filters_hall_capacity() {
        let modules = vec![Module::new("A", 120).with_duration(1)];
        let halls = vec![Hall::new("Small", 40), Hall::new("Big", 200)];
        let cal = calendar(1, 2);
        let built = ModelBuilder::new(&modules, &halls, &cal, Variant::DurationClass).build();
        assert!(!built.model.evaluate(&class_point(&built, &[(0, 0, 0)])));
        assert!(built.model.evaluate(&class_point(&built, &[(0, 1, 0)])));
    }
}
