use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::session::require_admin;
use crate::errors::AppError;
use crate::models::document::Document;
use crate::store::Store;

/// GET /api/export/{kind} - CSV download of members, sessions or
/// attendance (admin)
pub async fn csv(
    store: web::Data<Store>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    let kind = path.into_inner();
    let body = store
        .read(|doc| match kind.as_str() {
            "members" => Some(members_csv(doc)),
            "sessions" => Some(sessions_csv(doc)),
            "attendance" => Some(attendance_csv(doc)),
            _ => None,
        })
        .ok_or(AppError::NotFound("export"))?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"climbclub-{kind}.csv\""),
        ))
        .body(body))
}

/// Every cell is quoted; embedded quotes are doubled.
fn csv_row<'a>(cells: impl IntoIterator<Item = &'a str>) -> String {
    cells
        .into_iter()
        .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

fn members_csv(doc: &Document) -> String {
    let mut rows = vec![csv_row([
        "id",
        "name",
        "email",
        "belay",
        "emergency",
        "pr",
        "notes",
    ])];
    for m in &doc.members {
        rows.push(csv_row([
            m.id.as_str(),
            m.name.as_str(),
            m.email.as_str(),
            if m.belay { "true" } else { "false" },
            m.emergency.as_str(),
            m.pr.as_str(),
            m.notes.as_str(),
        ]));
    }
    rows.join("\n")
}

fn sessions_csv(doc: &Document) -> String {
    let mut rows = vec![csv_row([
        "id",
        "date",
        "location",
        "start",
        "end",
        "discipline",
        "capacity",
        "notes",
    ])];
    for s in &doc.sessions {
        let capacity = s.capacity.to_string();
        rows.push(csv_row([
            s.id.as_str(),
            s.date.as_str(),
            s.location.as_str(),
            s.start.as_str(),
            s.end.as_str(),
            s.discipline.as_str(),
            capacity.as_str(),
            s.notes.as_str(),
        ]));
    }
    rows.join("\n")
}

fn attendance_csv(doc: &Document) -> String {
    let mut rows = vec![csv_row([
        "session_id",
        "member_id",
        "registered",
        "attended",
        "notes",
    ])];
    for (session_id, roster) in &doc.attendance {
        for (member_id, record) in roster {
            rows.push(csv_row([
                session_id.as_str(),
                member_id.as_str(),
                if record.registered { "true" } else { "false" },
                if record.attended { "true" } else { "false" },
                record.notes.as_str(),
            ]));
        }
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::csv_row;

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(csv_row(["a", "b\"c"]), "\"a\",\"b\"\"c\"");
    }
}
