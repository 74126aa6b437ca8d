use crate::*;

pub fn handle_reconcile_command(cli: &Cli, layout: &Layout) -> anyhow::Result<bool> {
    let Commands::Reconcile {
        fix,
        verbose,
        review,
    } = &cli.command
    else {
        return Ok(false);
    };

    // --review replaces the track comparison entirely.
    if let Some(paths) = review {
        let (old, new) = match paths.as_slice() {
            [old, new] => (old, new),
            _ => anyhow::bail!("--review takes exactly two paths"),
        };
        let report = review_files(old, new)?;
        print_review(&report);
        return Ok(true);
    }

    let opts = ReconcileOptions {
        fix: *fix,
        verbose: *verbose,
    };
    let mut report = reconcile(layout, opts, &mut FsWriter)?;
    print_reconcile(&report, layout, opts);
    if let Some(e) = report.fix_error.take() {
        return Err(e.into());
    }
    if report.unresolved() > 0 {
        std::process::exit(1);
    }
    Ok(true)
}

fn print_reconcile(report: &ReconcileReport, layout: &Layout, opts: ReconcileOptions) {
    println!("=== {} Config Reconciliation ===\n", VENDOR_CATEGORY);
    for t in &report.tracks {
        match t.enabled {
            Some(n) => println!("  {:8} {:25} ({} enabled options)", t.label, t.file, n),
            None => println!("  {:8} {:25} (not found, skipping)", t.label, t.file),
        }
    }

    if !report.compared {
        println!("\nNeed at least 2 configs to compare.");
        return;
    }
    println!();

    if !report.policy_found {
        println!(
            "Warning: policy file not found: {}\n",
            display_path(&layout.policy_path())
        );
    }

    if report.policy_size > 0 {
        println!("--- Policy Check ---");
        if report.violations.is_empty() {
            println!("  All options match policy.\n");
        } else {
            for v in &report.violations {
                match &v.kind {
                    ViolationKind::Missing => println!(
                        "  {:25} {}  MISSING  (policy: {})",
                        v.file, v.option, v.required
                    ),
                    ViolationKind::Mismatch { actual } => println!(
                        "  {:25} {}={}  (policy: {})",
                        v.file, v.option, actual, v.required
                    ),
                }
            }
            println!();
            if opts.fix {
                for f in &report.fixed {
                    println!("  Fixed: {}: {} -> {}", f.file, f.old, f.new);
                }
                if !report.fixed.is_empty() {
                    println!("\n  {} violation(s) fixed.\n", report.fixed.len());
                }
            }
        }
    }

    let header = if opts.verbose {
        format!("{}-Specific Options (all)", VENDOR_CATEGORY)
    } else {
        format!("{}-Specific Divergence", VENDOR_CATEGORY)
    };
    println!("--- {} ---", header);
    if report.vendor_rows.is_empty() {
        println!(
            "  All {}-specific options are consistent across tracks.",
            VENDOR_CATEGORY
        );
    } else {
        for row in &report.vendor_rows {
            let parts: Vec<String> = row
                .values
                .iter()
                .map(|(label, value)| format!("{}={}", label, value))
                .collect();
            let marker = if row.divergent { " ***" } else { "" };
            println!("  {:45} {}{}", row.option, parts.join("  "), marker);
        }
    }
    println!();

    println!("--- Summary ---");
    println!("  {} policy violation(s)", report.violations.len());
    if opts.fix {
        println!("  {} unresolved after fix", report.unresolved());
    }
    println!(
        "  {} divergent {}-specific option(s)",
        report.divergent_count(),
        VENDOR_CATEGORY
    );
    println!(
        "  {} total {}-specific options checked",
        report.vendor_total, VENDOR_CATEGORY
    );
}

fn print_review(report: &ReviewReport) {
    println!(
        "=== Config Review: {} -> {} ===\n",
        report.old_name, report.new_name
    );
    println!("  Old: {} enabled options", report.old_enabled);
    println!("  New: {} enabled options", report.new_enabled);
    println!();

    if !report.has_changes() {
        println!("  No differences.\n");
    }

    if report.added_total > 0 {
        println!("--- NEW options ({}) ---", report.added_total);
        for bucket in &report.added {
            if bucket.hidden() > 0 {
                println!(
                    "\n  [{}] ({} options, showing first {})",
                    bucket.category,
                    bucket.total,
                    bucket.shown.len()
                );
            } else {
                println!("\n  [{}]", bucket.category);
            }
            for (opt, val) in &bucket.shown {
                println!("    {}={}", opt, val);
            }
            if bucket.hidden() > 0 {
                println!("    ... ({} more)", bucket.hidden());
            }
        }
        println!();
    }

    if report.removed_total() > 0 {
        println!("--- REMOVED options ({}) ---", report.removed_total());
        if !report.removed_enabled.is_empty() {
            println!("\n  Previously ENABLED (review!):");
            for (opt, val) in &report.removed_enabled {
                println!("    {} (was: {})", opt, val);
            }
        }
        if !report.removed_disabled.is_empty() {
            println!(
                "\n  Previously disabled ({} options, no action needed)",
                report.removed_disabled.len()
            );
        }
        println!();
    }

    if !report.changed.is_empty() {
        println!("--- CHANGED values ({}) ---", report.changed.len());
        for c in &report.changed {
            let flag = if c.vendor {
                format!(" [{}]", VENDOR_CATEGORY)
            } else {
                String::new()
            };
            println!("  {}: {} -> {}{}", c.option, c.old, c.new, flag);
        }
        println!();
    }

    println!("--- Summary ---");
    println!("  {} new options", report.added_total);
    println!("  {} removed options", report.removed_total());
    println!("  {} changed values", report.changed.len());
}
