use grimoire_engine::{
    CombinationReport, ConflictEngine, ConflictResult, ConflictSource, RuleValidation, Statistics,
};

/// Statistics as a markdown table, one row per display category.
pub fn format_statistics(stats: &Statistics) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Total conflicting pairs: **{}** ({} group, {} category)\n\n",
        stats.total_conflicts, stats.group_conflicts, stats.category_conflicts
    ));
    out.push_str("| Category | Pairs |\n");
    out.push_str("|----------|-------|\n");
    for (category, count) in &stats.by_category {
        out.push_str(&format!("| {} | {} |\n", category, count));
    }
    out
}

/// Validation issues as markdown bullet lists.
pub fn format_validation(validation: &RuleValidation) -> String {
    if validation.errors.is_empty() && validation.warnings.is_empty() {
        return "No rule issues found.\n".to_string();
    }
    let mut out = String::new();
    if !validation.errors.is_empty() {
        out.push_str(&format!("### Errors ({})\n\n", validation.errors.len()));
        for e in &validation.errors {
            out.push_str(&format!("- {}\n", e));
        }
        out.push('\n');
    }
    if !validation.warnings.is_empty() {
        out.push_str(&format!("### Warnings ({})\n\n", validation.warnings.len()));
        for w in &validation.warnings {
            out.push_str(&format!("- {}\n", w));
        }
    }
    out
}

/// Pairwise conflicts as a markdown table with display names.
pub fn format_conflicts(engine: &ConflictEngine, results: &[ConflictResult]) -> String {
    if results.is_empty() {
        return "No conflicts: these items can coexist.\n".to_string();
    }
    let name = |id: &str| engine.item_name(id, false).unwrap_or_else(|| id.to_string());

    let mut out = String::new();
    out.push_str("| Item A | Item B | Source | Reason | Category |\n");
    out.push_str("|--------|--------|--------|--------|----------|\n");
    for r in results {
        let source = match &r.source {
            ConflictSource::Group { name } => format!("group `{}`", name),
            ConflictSource::Category { declared_by } => format!("category `{}`", declared_by),
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} {} |\n",
            name(&r.item_a),
            name(&r.item_b),
            source,
            r.reason,
            r.category.icon,
            r.category.display_name,
        ));
    }
    out
}

/// Verdict, binder requirement, and per-item conflict map for one set.
pub fn format_combination(engine: &ConflictEngine, report: &CombinationReport) -> String {
    let name = |id: &str| engine.item_name(id, false).unwrap_or_else(|| id.to_string());

    let mut out = String::new();
    let verdict = if report.is_compatible {
        "compatible".to_string()
    } else if let Some(level) = report.min_binder_level {
        format!("compatible with a level {} binder", level)
    } else {
        "incompatible".to_string()
    };
    out.push_str(&format!(
        "{} items, {} conflicting pairs: **{}**\n",
        report.items.len(),
        report.conflict_count,
        verdict
    ));
    if report.conflict_map.is_empty() {
        return out;
    }

    out.push('\n');
    out.push_str("| Item | Conflicts with |\n");
    out.push_str("|------|----------------|\n");
    for (id, others) in &report.conflict_map {
        let others: Vec<String> = others.iter().map(|o| name(o)).collect();
        out.push_str(&format!("| {} | {} |\n", name(id), others.join(", ")));
    }
    out
}
