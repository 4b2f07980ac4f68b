use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::queries::{OccurrenceFilter, count_attendance, list_occurrences, roster_size};
use crate::errors::{AppError, AppResult};
use crate::models::occurrence::Occurrence;
use crate::models::role::Principal;
use crate::utils::colors::{GREY, RESET, color_for_occurrence};
use crate::utils::date;
use crate::utils::table::{Column, Table};
use serde::Serialize;

#[derive(Serialize)]
struct ListedOccurrence<'a> {
    #[serde(flatten)]
    occurrence: &'a Occurrence,
    roster_size: i64,
    attendance_count: i64,
}

pub fn handle(cmd: &Commands, cfg: &Config, principal: &Principal) -> AppResult<()> {
    if let Commands::List {
        class_name,
        counselor,
        from,
        to,
        json,
    } = cmd
    {
        // Counselors list their own sessions unless they ask otherwise.
        let counselor_id = match counselor {
            Some(c) => Some(*c),
            None if principal.is_admin() => None,
            None => Some(principal.id),
        };

        let filter = OccurrenceFilter {
            class_name: class_name.clone(),
            counselor_id,
            from: date::parse_optional_date(from.as_ref())?,
            to: date::parse_optional_date(to.as_ref())?,
        };

        let pool = open_pool(cfg)?;
        let occurrences = list_occurrences(&pool.conn, &filter)?;

        let mut listed = Vec::with_capacity(occurrences.len());
        for occ in &occurrences {
            listed.push(ListedOccurrence {
                occurrence: occ,
                roster_size: roster_size(&pool.conn, occ.id)?,
                attendance_count: count_attendance(&pool.conn, occ.id)?,
            });
        }

        if *json {
            let out = serde_json::to_string_pretty(&listed)
                .map_err(|e| AppError::Export(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        if listed.is_empty() {
            println!("No occurrences found.");
            return Ok(());
        }

        print_table(&listed, &cfg.separator_char);
    }

    Ok(())
}

fn print_table(listed: &[ListedOccurrence<'_>], separator: &str) {
    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("DATE"),
        Column::new("DAY"),
        Column::new("HOURS"),
        Column::new("CLASS"),
        Column::new("GROUP"),
        Column::new("COUNSELOR"),
        Column::new("ROSTER"),
        Column::new("ATT"),
        Column::new("FLAGS"),
    ]);

    for item in listed {
        let occ = item.occurrence;
        let mut flags = Vec::new();
        if occ.recurring {
            flags.push(format!("R:{}", occ.frequency_str().unwrap_or("?")));
        }
        if occ.locked {
            flags.push("LOCKED".to_string());
        }

        table.add_row(vec![
            occ.id.to_string(),
            occ.date_str(),
            date::weekday_short(&occ.date),
            occ.details.group_hours.clone(),
            occ.class_name().to_string(),
            occ.details.group_name.clone(),
            occ.counselor_id.to_string(),
            item.roster_size.to_string(),
            item.attendance_count.to_string(),
            flags.join(" "),
        ]);
    }

    let rendered = table.render(separator);
    let mut lines = rendered.lines();

    if let Some(header) = lines.next() {
        println!("{}", header);
    }
    if let Some(sep) = lines.next() {
        println!("{}{}{}", GREY, sep, RESET);
    }
    for (line, item) in lines.zip(listed) {
        let color = color_for_occurrence(item.occurrence.locked, item.occurrence.recurring);
        println!("{}{}{}", color, line, RESET);
    }
}
