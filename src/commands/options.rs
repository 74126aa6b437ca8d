use crate::*;

pub fn handle_option_commands(cli: &Cli, layout: &Layout) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Show { option } => {
            show_option(layout, &OptionName::parse(option))?;
        }
        Commands::Set {
            assignment,
            policy,
            doc,
            doc_type,
            desc,
            apply,
        } => {
            let doc = match (doc, doc_type, desc) {
                (Some(heading), Some(kind), Some(description)) => Some(DocSpec {
                    heading: heading.clone(),
                    kind: kind.clone(),
                    description: description.clone(),
                }),
                _ => None,
            };
            let req = SetRequest {
                option: OptionName::parse(&assignment.option),
                value: assignment.value.clone(),
                policy_section: policy.clone(),
                doc,
            };
            let plan = plan_set(layout, &req)?;
            for w in &plan.warnings {
                println!("  warn: {}", w);
            }
            if plan.is_empty() {
                println!(
                    "No changes needed: {}={} already set everywhere.",
                    req.option.key(),
                    req.value
                );
                return Ok(true);
            }
            print_and_apply(&plan, *apply)?;
        }
        Commands::Remove {
            option,
            policy,
            doc,
            apply,
        } => {
            let req = RemoveRequest {
                option: OptionName::parse(option),
                from_policy: *policy,
                from_doc: *doc,
            };
            let plan = plan_remove(layout, &req)?;
            if plan.is_empty() {
                println!("Nothing to remove for {}.", req.option);
                return Ok(true);
            }
            print_and_apply(&plan, *apply)?;
        }
        Commands::Reconcile { .. } => return Ok(false),
    }
    Ok(true)
}

fn show_option(layout: &Layout, name: &OptionName) -> anyhow::Result<()> {
    let key = name.key();
    println!("=== {} ===\n", key);

    let display = |value: Option<OptionValue>| match value {
        Some(v) => v.render(name),
        None => "(not found)".to_string(),
    };

    for spec in &layout.tracks {
        let path = layout.track_path(spec);
        if let Some(text) = read_optional(&path)? {
            let value = ConfigText::parse(&text).get(name);
            println!("  {:25} {}", file_name(&path), display(value));
        }
    }

    for path in layout.dev_configs()? {
        if let Some(text) = read_optional(&path)? {
            let value = ConfigText::parse(&text).get(name);
            println!("  (dev) {:19} {}", file_name(&path), display(value));
        }
    }

    let entry = read_optional(&layout.policy_path())?.and_then(|t| PolicyText::parse(&t).lookup(name));
    match entry {
        Some(e) => println!("  {:25} [{}] {}={}", "policy", e.section, name, e.value),
        None => println!("  {:25} (not in policy)", "policy"),
    }

    let row = read_optional(&layout.readme_path())?
        .and_then(|t| DocText::parse(&t).find_row(name).map(str::to_string));
    match row {
        Some(r) => println!("  {:25} {}", "README", r),
        None => println!("  {:25} (not documented)", "README"),
    }

    println!();
    Ok(())
}

fn print_and_apply(plan: &Plan, apply: bool) -> anyhow::Result<()> {
    println!(
        "{}: {} file(s) to update\n",
        if apply { "Will apply" } else { "Dry run" },
        plan.changes.len()
    );
    for c in &plan.changes {
        println!("  {}: {}", display_path(&c.path), c.description);
    }

    if !apply {
        println!("\nPass --apply to write changes.");
        return Ok(());
    }

    println!();
    let report = plan.apply(&mut FsWriter);
    for (path, outcome) in &report.outcomes {
        match outcome {
            WriteOutcome::Written => println!("  wrote {}", file_name(path)),
            WriteOutcome::Failed(_) => println!("  FAILED {}", file_name(path)),
            WriteOutcome::NotAttempted => println!("  not written {}", file_name(path)),
        }
    }
    let written = report.into_result()?;
    println!("\nDone. {} file(s) updated.", written);
    Ok(())
}
