use timetable_solver::config::SolverConfig;
use timetable_solver::solver::HighsSolver;
use timetable_solver::{Hall, Module, Status, TimetableEntry, TimetableResult, Variant, solve_with};

fn config(variant: Variant, days: usize, slots: u32) -> SolverConfig {
    let mut cfg = SolverConfig::for_variant(variant);
    cfg.days = (0..days).map(|d| format!("Day{}", d + 1)).collect();
    cfg.slots_per_day = slots;
    cfg.time_budget_seconds = 30.0;
    cfg.worker_count = 1;
    cfg
}

fn run(
    variant: Variant,
    modules: &[Module],
    halls: &[Hall],
    days: usize,
    slots: u32,
) -> TimetableResult {
    solve_with(&HighsSolver, variant, modules, halls, &config(variant, days, slots)).unwrap()
}

fn entry<'a>(result: &'a TimetableResult, code: &str) -> &'a TimetableEntry {
    result.timetable.iter().find(|e| e.code == code).unwrap()
}

fn assert_capacity_valid(result: &TimetableResult, halls: &[Hall]) {
    for e in &result.timetable {
        assert_eq!(e.allocated_total(), e.students, "{}", e.code);
        for a in &e.halls {
            assert!(a.allocated_students <= halls[a.hall_index].capacity, "{}", e.code);
        }
    }
}

fn assert_no_double_booking(result: &TimetableResult) {
    for (i, a) in result.timetable.iter().enumerate() {
        for b in &result.timetable[i + 1..] {
            let shared_hall = a.halls.iter().any(|h| b.uses_hall(h.hall_index));
            if a.day_index == b.day_index && shared_hall {
                let disjoint = a.end_slot <= b.start_slot || b.end_slot <= a.start_slot;
                assert!(disjoint, "{} and {} overlap", a.code, b.code);
            }
        }
    }
}

#[test]
fn two_modules_share_one_hall_at_different_slots() {
    let modules = vec![Module::new("M1", 50), Module::new("M2", 30)];
    let halls = vec![Hall::new("Main", 100)];
    let result = run(Variant::SingleHallExam, &modules, &halls, 1, 2);

    assert_eq!(result.status, Status::Optimal);
    assert_eq!(result.timetable.len(), 2);
    assert_ne!(entry(&result, "M1").start_slot, entry(&result, "M2").start_slot);
    assert!(result.timetable.iter().all(|e| e.halls[0].hall == "Main"));
    assert_capacity_valid(&result, &halls);
}

#[test]
fn oversized_exam_needs_split_halls() {
    let modules = vec![Module::new("BIG", 150)];
    let halls = vec![Hall::new("H80", 80), Hall::new("H90", 90)];

    let single = run(Variant::SingleHallExam, &modules, &halls, 1, 2);
    assert_eq!(single.status, Status::NoSolution);
    assert!(single.timetable.is_empty());

    let split = run(Variant::SplitHallExam, &modules, &halls, 1, 2);
    assert_eq!(split.status, Status::Optimal);
    let e = entry(&split, "BIG");
    assert_eq!(e.halls.len(), 2);
    assert_eq!(e.allocated_total(), 150);
    assert_capacity_valid(&split, &halls);
}

#[test]
fn same_department_classes_never_share_a_slot() {
    let modules = vec![
        Module::new("EC3201", 40).with_duration(2).with_department("EC").with_semester(5),
        Module::new("EC3202", 40).with_duration(2).with_department("EC").with_semester(5),
    ];
    let halls = vec![Hall::new("LT1", 100)];
    let result = run(Variant::DurationClass, &modules, &halls, 1, 4);

    assert_eq!(result.status, Status::Optimal);
    let (a, b) = (entry(&result, "EC3201"), entry(&result, "EC3202"));
    assert!(a.end_slot <= b.start_slot || b.end_slot <= a.start_slot);
    assert!(!(a.occupies(0, 1) && b.occupies(0, 1)));
    assert_eq!(result.expanded_slots.len(), 4);
}

#[test]
fn department_separation_holds_across_halls() {
    let modules = vec![
        Module::new("A1", 30).with_duration(2).with_department("CE").with_semester(3),
        Module::new("A2", 30).with_duration(3).with_department("CE").with_semester(3),
        Module::new("A3", 30).with_duration(1).with_department("CE").with_semester(3),
        Module::new("B1", 60).with_duration(2).with_department("EE").with_semester(3),
        Module::new("B2", 60).with_duration(2).with_department("EE").with_semester(5),
        Module::new("C1", 90).with_duration(4),
    ];
    let halls = vec![Hall::new("LT1", 100), Hall::new("LT2", 60), Hall::new("Lab", 35)];
    let result = run(Variant::DurationClass, &modules, &halls, 2, 4);

    assert!(result.status.has_solution());
    assert_eq!(result.timetable.len(), modules.len());
    assert_capacity_valid(&result, &halls);
    assert_no_double_booking(&result);

    for (i, a) in result.timetable.iter().enumerate() {
        for b in &result.timetable[i + 1..] {
            let same_group = a.department.is_some()
                && a.department == b.department
                && a.semester.is_some()
                && a.semester == b.semester;
            if same_group && a.day_index == b.day_index {
                assert!(
                    a.end_slot <= b.start_slot || b.end_slot <= a.start_slot,
                    "{} and {} share a day without ordering",
                    a.code,
                    b.code
                );
            }
        }
    }
    let expanded: u32 = result.timetable.iter().map(|e| e.duration).sum();
    assert_eq!(result.expanded_slots.len() as u32, expanded);
}

#[test]
fn soft_objective_spreads_department_exams() {
    let modules = vec![
        Module::new("EE1", 20).with_department("EE"),
        Module::new("EE2", 20).with_department("EE"),
        Module::new("ME1", 20).with_department("ME"),
    ];
    let halls = vec![Hall::new("H1", 50), Hall::new("H2", 50)];
    let result = run(Variant::SingleHallExam, &modules, &halls, 1, 2);

    assert_eq!(result.status, Status::Optimal);
    assert_eq!(result.objective, Some(0));
    assert_ne!(entry(&result, "EE1").start_slot, entry(&result, "EE2").start_slot);
    assert_no_double_booking(&result);
}

#[test]
fn unavoidable_overlaps_are_counted() {
    // three EE exams, two cells: at least one pair must share a cell
    let modules = vec![
        Module::new("EE1", 20).with_department("EE"),
        Module::new("EE2", 20).with_department("EE"),
        Module::new("EE3", 20).with_department("EE"),
    ];
    let halls = vec![Hall::new("H1", 50), Hall::new("H2", 50)];
    let result = run(Variant::SplitHallExam, &modules, &halls, 1, 2);

    assert_eq!(result.status, Status::Optimal);
    assert_eq!(result.objective, Some(1));
    assert_capacity_valid(&result, &halls);
    assert_no_double_booking(&result);
}

#[test]
fn split_exams_fill_a_session() {
    let modules = vec![
        Module::new("X1", 120),
        Module::new("X2", 45),
        Module::new("X3", 200),
        Module::new("X4", 10),
    ];
    let halls = vec![
        Hall::new("A", 100),
        Hall::new("B", 60),
        Hall::new("C", 50),
        Hall::new("D", 40),
    ];
    let result = run(Variant::SplitHallExam, &modules, &halls, 2, 2);

    assert!(result.status.has_solution());
    // every module placed exactly once
    let mut codes: Vec<_> = result.timetable.iter().map(|e| e.code.as_str()).collect();
    codes.sort();
    assert_eq!(codes, vec!["X1", "X2", "X3", "X4"]);
    assert!(result.timetable.iter().all(|e| e.end_slot == e.start_slot + 1));
    assert_capacity_valid(&result, &halls);
    assert_no_double_booking(&result);
}

#[test]
fn not_enough_cells_is_no_solution() {
    let modules = vec![Module::new("A", 10), Module::new("B", 10)];
    let halls = vec![Hall::new("H", 50)];
    let result = run(Variant::SingleHallExam, &modules, &halls, 1, 1);
    assert_eq!(result.status, Status::NoSolution);
    assert!(result.reason.is_some());
    assert!(result.diagnostics.is_some());
}

#[test]
fn later_runs_may_ask_for_other_worker_counts() {
    let modules = vec![Module::new("M1", 50), Module::new("M2", 30)];
    let halls = vec![Hall::new("Main", 100)];
    for worker_count in [1, 8, 2] {
        let mut cfg = config(Variant::SingleHallExam, 1, 2);
        cfg.worker_count = worker_count;
        let result =
            solve_with(&HighsSolver, Variant::SingleHallExam, &modules, &halls, &cfg).unwrap();
        assert_eq!(result.status, Status::Optimal, "workers={worker_count}");
        assert_eq!(result.timetable.len(), 2);
    }
}
