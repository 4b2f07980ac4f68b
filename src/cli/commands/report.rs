use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::queries::ReportFilter;
use crate::errors::AppResult;
use crate::export::export_report;
use crate::models::role::Principal;
use crate::utils::date;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, principal: &Principal) -> AppResult<()> {
    if let Commands::Report {
        from,
        to,
        class_name,
        counselor,
        attendee,
        format,
        file,
        force,
    } = cmd
    {
        let filter = ReportFilter {
            from: date::parse_optional_date(from.as_ref())?,
            to: date::parse_optional_date(to.as_ref())?,
            class_name: class_name.clone(),
            counselor_id: *counselor,
            attendee_id: *attendee,
        };

        let pool = open_pool(cfg)?;
        let rows = ReportLogic::build(&pool, principal, &filter)?;

        if let Some(f) = file {
            return export_report(&rows, *format, f, *force);
        }

        if rows.is_empty() {
            println!("No attendance records found.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("DATE"),
            Column::new("HOURS"),
            Column::new("CLASS"),
            Column::new("COUNSELOR"),
            Column::new("ATTENDEE"),
            Column::new("CODE"),
            Column::new("STATUS"),
            Column::new("IN"),
            Column::new("OUT"),
        ]);
        for r in &rows {
            table.add_row(vec![
                r.date.clone(),
                r.group_hours.clone(),
                r.class_name.clone(),
                r.counselor_id.to_string(),
                r.attendee_name.clone(),
                r.attendee_code.clone(),
                r.status.clone(),
                r.time_in.clone(),
                r.time_out.clone(),
            ]);
        }
        print!("{}", table.render(&cfg.separator_char));
        println!("\n{} record(s).", rows.len());
    }

    Ok(())
}
