use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;
use crate::utils::colors::strip_ansi;

const MAX_OP_WIDTH: usize = 40;

/// Colour per audited operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "clock_in" | "add" => Colour::Green,
        "clock_out" => Colour::Cyan,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "squish" | "unsquish" => Colour::Purple,
        "submit" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// One row of the internal `log` table.
#[derive(Debug, Clone)]
pub struct LogRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    pub fn load(pool: &DbPool) -> AppResult<Vec<LogRow>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(LogRow {
                id: row.get(0)?,
                date: row.get(1)?,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let rows = Self::load(pool)?;
        if rows.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for row in rows {
            let painted = color_for_operation(&row.operation)
                .paint(row.operation.as_str())
                .to_string();
            let op_target = if row.target.is_empty() {
                painted
            } else {
                format!("{} ({})", painted, row.target)
            };

            let visible_len = strip_ansi(&op_target).chars().count();
            let padding = " ".repeat(MAX_OP_WIDTH.saturating_sub(visible_len));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                row.id,
                row.date,
                op_target,
                padding,
                row.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
