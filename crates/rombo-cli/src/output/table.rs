use rombo_core::compat::PairAssessment;
use rombo_core::matrix::PairConflict;
use rombo_core::trace::{PairTrace, TraceStepType};
use rombo_core::CompatibilityMatrix;

pub fn print_classification(rows: &[(String, String)]) {
    if rows.is_empty() {
        println!("Inventory is empty.");
        return;
    }

    let max_name = rows.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(10);

    for (name, tags) in rows {
        println!("  {:<width$}  {}", name, tags, width = max_name);
    }
}

pub fn print_assessment(key_a: &str, key_b: &str, assessment: &PairAssessment) {
    let v = &assessment.verdict;
    println!("  {} x {}\n", key_a, key_b);
    println!("  {}  {}  {}", v.icon, v.status, v.message);
    println!();
    println!("  {}: {}", key_a, assessment.classes_a);
    println!("  {}: {}", key_b, assessment.classes_b);
    println!("  Rule: {}", v.rule);
}

pub fn print_trace(trace: &PairTrace) {
    println!("  {} x {}\n", trace.item_a, trace.item_b);

    for step in &trace.steps {
        let marker = match (step.step_type, step.matched) {
            (TraceStepType::Decision, _) => "=>",
            (_, Some(true)) => "[x]",
            (_, Some(false)) => "[ ]",
            (_, None) => "  ",
        };
        match step.rule {
            Some(rule) if step.step_type != TraceStepType::Decision => {
                println!("  {:<3} {:<24} {}", marker, rule, step.message)
            }
            _ => println!("  {:<3} {}", marker, step.message),
        }
    }
}

pub fn print_matrix(matrix: &CompatibilityMatrix) {
    if matrix.is_empty() {
        println!("Inventory is empty.");
        return;
    }

    // Legend: number -> item
    let n = matrix.len();
    let num_width = n.to_string().len();
    for (i, label) in matrix.labels().iter().enumerate() {
        println!(
            "  {:>width$}  {}  [{}]",
            i + 1,
            label,
            matrix.classes[i],
            width = num_width
        );
    }
    println!();

    print!("  {:>width$} ", "", width = num_width);
    for j in 0..n {
        print!(" {:>3}", j + 1);
    }
    println!();

    for (i, row) in matrix.cells.iter().enumerate() {
        print!("  {:>width$} ", i + 1, width = num_width);
        for verdict in row {
            print!("  {}", verdict.icon);
        }
        println!();
    }
    println!();

    let summary = matrix.summary();
    println!(
        "  {} items, {} pairs: {} danger, {} caution, {} ok, {} same substance",
        summary.items, summary.pairs, summary.danger, summary.caution, summary.ok, summary.same
    );

    let conflicts = matrix.conflicts();
    if !conflicts.is_empty() {
        println!();
        print_conflicts(&conflicts);
    }
}

pub fn print_conflicts(conflicts: &[PairConflict]) {
    if conflicts.is_empty() {
        println!("  No incompatible pairs.");
        return;
    }

    println!("  Incompatible pairs:");
    for c in conflicts {
        println!(
            "    {} {:<7} {} x {}: {}",
            c.verdict.icon, c.verdict.status, c.item_a, c.item_b, c.verdict.message
        );
    }
}
